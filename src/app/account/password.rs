//! 密码哈希
//!
//! 存储格式为 `pbkdf2_sha256$<iterations>$<salt>$<hex digest>`，
//! 校验时使用哈希中记录的迭代次数，摘要比较为常量时间。

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use uuid::Uuid;

const ALGORITHM: &str = "pbkdf2_sha256";
const DIGEST_LEN: usize = 32;

pub const DEFAULT_ITERATIONS: u32 = 600_000;

pub fn hash_password(password: &str, iterations: u32) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!(
        "{}${}${}${}",
        ALGORITHM,
        iterations,
        salt,
        to_hex(&derive(password, &salt, iterations))
    )
}

pub fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.splitn(4, '$');
    let (Some(ALGORITHM), Some(iterations), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }

    let actual = to_hex(&derive(password, salt, iterations));
    constant_time_eq(actual.as_bytes(), expected.as_bytes())
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
    out
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 长度不同直接返回 false；长度相同时遍历全部字节
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: u32 = 1_000;

    #[test]
    fn test_hash_and_verify() {
        let encoded = hash_password("correct horse", FAST);
        assert!(encoded.starts_with("pbkdf2_sha256$1000$"));
        assert!(verify_password("correct horse", &encoded));
        assert!(!verify_password("wrong horse", &encoded));
    }

    #[test]
    fn test_salt_differs() {
        assert_ne!(hash_password("same", FAST), hash_password("same", FAST));
    }

    #[test]
    fn test_iterations_read_from_hash() {
        let encoded = hash_password("pw", 10);
        assert!(verify_password("pw", &encoded));

        // 改写迭代次数后摘要不再匹配
        let tampered = encoded.replacen("$10$", "$11$", 1);
        assert!(!verify_password("pw", &tampered));
    }

    #[test]
    fn test_known_vector() {
        // RFC 7914 §11 的 PBKDF2-HMAC-SHA256 向量
        let digest = derive("passwd", "salt", 1);
        assert_eq!(
            to_hex(&digest),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_malformed_hash() {
        assert!(!verify_password("x", "plain"));
        assert!(!verify_password("x", "sha256$salt$abc"));
        assert!(!verify_password("x", "pbkdf2_sha256$many$salt$abc"));
        assert!(!verify_password("x", "pbkdf2_sha256$0$salt$abc"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
