//! CSS color syntax validation for `theme_color`, `background_color` and the
//! `theme-color` meta tag.

use std::sync::LazyLock;

use regex::Regex;

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen", "transparent",
];

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})$")
        .expect("hex color regex is valid")
});

static COLOR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(rgba?|hsla?)\((.*)\)$").expect("color function regex is valid")
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:e[+-]?\d+)?$").expect("number regex is valid")
});

#[derive(Clone, Copy, PartialEq)]
enum Component {
    Number,
    Percent,
    Angle,
}

fn component(token: &str) -> Option<Component> {
    if let Some(n) = token.strip_suffix('%') {
        return NUMBER.is_match(n).then_some(Component::Percent);
    }
    for unit in ["deg", "grad", "rad", "turn"] {
        if let Some(n) = token.strip_suffix(unit) {
            return NUMBER.is_match(n).then_some(Component::Angle);
        }
    }
    NUMBER.is_match(token).then_some(Component::Number)
}

/// Split `args` into color channels and an optional alpha. Accepts the legacy
/// comma syntax and the space syntax with `/ alpha`.
fn split_args(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    let args = args.trim();
    if args.contains(',') {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        return match parts.len() {
            3 => Some((parts, None)),
            4 => Some((parts[..3].to_vec(), Some(parts[3]))),
            _ => None,
        };
    }

    let (channels, alpha) = match args.split_once('/') {
        Some((c, a)) => (c, Some(a.trim())),
        None => (args, None),
    };
    let parts: Vec<&str> = channels.split_whitespace().collect();
    if parts.len() != 3 || alpha.is_some_and(|a| a.is_empty() || a.contains(' ')) {
        return None;
    }
    Some((parts, alpha))
}

fn valid_alpha(alpha: Option<&str>) -> bool {
    alpha.map_or(true, |a| {
        matches!(component(a), Some(Component::Number | Component::Percent))
    })
}

fn valid_function(name: &str, args: &str) -> bool {
    let Some((channels, alpha)) = split_args(args) else {
        return false;
    };
    let kinds: Option<Vec<Component>> = channels.iter().map(|c| component(c)).collect();
    let Some(kinds) = kinds else {
        return false;
    };

    let channels_ok = if name.starts_with("rgb") {
        // all numbers or all percentages
        kinds.iter().all(|k| *k == Component::Number)
            || kinds.iter().all(|k| *k == Component::Percent)
    } else {
        matches!(kinds[0], Component::Number | Component::Angle)
            && kinds[1] == Component::Percent
            && kinds[2] == Component::Percent
    };
    channels_ok && valid_alpha(alpha)
}

/// Whether `value` is a syntactically valid CSS color.
pub fn is_valid_css_color(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() {
        return false;
    }
    if value.starts_with('#') {
        return HEX_COLOR.is_match(&value);
    }
    if let Some(caps) = COLOR_FUNCTION.captures(&value) {
        return valid_function(&caps[1], &caps[2]);
    }
    NAMED_COLORS.contains(&value.as_str())
}
