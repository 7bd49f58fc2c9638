use super::sanitizer::sanitize;
use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 随机后缀长度
pub const TOKEN_LEN: usize = 6;

/// 拆分文件名为主名和扩展名（不含点）
/// 与常见的 extname 语义一致：以点开头的文件名视为没有扩展名
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rfind('.') {
        Some(idx) if idx > 0 => (&base[..idx], Some(&base[idx + 1..])),
        _ => (base, None),
    }
}

/// 6位base36随机串，只用于同一毫秒内的冲突规避
pub fn random_token<R: Rng>(rng: &mut R) -> String {
    (0..TOKEN_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// `<毫秒时间戳>_<随机串>_<清洗后的主名><小写扩展名>`
pub fn generate_file_name<R: Rng>(original: &str, unix_millis: i64, rng: &mut R) -> String {
    let (stem, ext) = split_file_name(original);
    let ext = ext
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();
    format!(
        "{}_{}_{}{}",
        unix_millis,
        random_token(rng),
        sanitize(stem),
        ext
    )
}

/// 使用当前时间和线程随机数生成文件名
pub fn unique_file_name(original: &str) -> String {
    generate_file_name(original, Utc::now().timestamp_millis(), &mut rand::thread_rng())
}
