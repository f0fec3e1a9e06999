pub mod time_format;
pub mod url_validator;

pub use time_format::format_remaining;
pub use url_validator::validate_url;

/// 短码字母表：大小写字母与数字
pub const SHORT_CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const MIN_SHORT_CODE_LEN: usize = 3;
pub const MAX_SHORT_CODE_LEN: usize = 20;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 随机选择字母和数字
    iter::repeat_with(|| {
        SHORT_CODE_ALPHABET[rand::random_range(0..SHORT_CODE_ALPHABET.len())] as char
    })
    .take(length)
    .collect()
}

/// 校验短码格式：3-20 位 ASCII 字母或数字
pub fn is_valid_short_code(code: &str) -> bool {
    (MIN_SHORT_CODE_LEN..=MAX_SHORT_CODE_LEN).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// 从给定标签中均匀抽取一个
pub fn sample_location(locations: &[String]) -> String {
    if locations.is_empty() {
        return "Unknown".to_string();
    }
    locations[rand::random_range(0..locations.len())].clone()
}
