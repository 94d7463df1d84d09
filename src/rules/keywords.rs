// Keyword tables shared by the rule parser and renderer

/// Header fields, in the order they appear in a rule
pub const HEADER_KEYS: [&str; 7] = [
    "action",
    "protocol",
    "srcip",
    "srcport",
    "direction",
    "dstip",
    "dstport",
];

/// Keywords that take no argument and are rendered as a bare `name;`
pub const ARGLESS_KEYWORDS: [&str; 15] = [
    "http_method",
    "ftpbounce",
    "file_data",
    "nocase",
    "rawbytes",
    "dce_stub_data",
    "fast_pattern",
    "http_client_body",
    "http_header",
    "http_raw_cookie",
    "http_raw_header",
    "http_uri",
    "http_stat_code",
    "http_stat_msg",
    "http_cookie",
];

/// Keywords that modify the preceding content keyword
pub const CONTENT_MODIFIERS: [&str; 17] = [
    "nocase",
    "rawbytes",
    "depth",
    "offset",
    "distance",
    "within",
    "http_client_body",
    "http_cookie",
    "http_raw_cookie",
    "http_header",
    "http_raw_header",
    "http_method",
    "http_uri",
    "http_raw_uri",
    "http_stat_code",
    "http_stat_msg",
    "fast_pattern",
];

/// Check if a keyword is one of the seven positional header fields
pub fn is_header(name: &str) -> bool {
    HEADER_KEYS.contains(&name)
}

/// Check if a keyword takes no argument
pub fn is_argless(name: &str) -> bool {
    ARGLESS_KEYWORDS.contains(&name)
}

/// Check if a keyword modifies a preceding content keyword
pub fn is_content_modifier(name: &str) -> bool {
    CONTENT_MODIFIERS.contains(&name)
}

/// Strip the numeric disambiguation suffix from a field key
///
/// Repeated keywords are stored as `content`, `content2`, `content3`, ...;
/// all of them render back as `content`.
pub fn base_name(key: &str) -> &str {
    key.trim_end_matches(|c: char| c.is_ascii_digit())
}
