use rand::{Rng, distr::Alphanumeric, seq::IndexedRandom};

/// 生成大写字母与数字组成的随机码
pub fn generate_code(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

/// 生成满足密码策略的随机密码（大小写字母与数字各至少一个）
pub fn generate_password(len: usize) -> String {
    const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
    const LOWER: &[u8] = b"abcdefghijkmnpqrstuvwxyz";
    const DIGITS: &[u8] = b"23456789";

    let len = len.max(8);
    let mut rng = rand::rng();
    let mut chars: Vec<char> = Vec::with_capacity(len);
    for set in [UPPER, LOWER, DIGITS] {
        if let Some(&b) = set.choose(&mut rng) {
            chars.push(char::from(b));
        }
    }
    while chars.len() < len {
        chars.push(char::from(rng.sample(Alphanumeric)));
    }
    // 打乱前三位固定字符的位置
    for i in (1..chars.len()).rev() {
        let j = rng.random_range(0..=i);
        chars.swap(i, j);
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_generate_code() {
        let code = generate_code(6);
        assert_eq!(code.len(), 6);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_generated_password_passes_policy() {
        for _ in 0..20 {
            let password = generate_password(16);
            assert_eq!(password.len(), 16);
            assert!(validate_password(&password).is_valid, "{password}");
        }
    }
}
