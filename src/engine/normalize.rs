/// Strip every whitespace character (ASCII and full-width alike).
///
/// Total and idempotent; applied before both tokenization and qualifier
/// extraction so that `中山路 10 號` and `中山路　10號` read the same.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ascii_and_full_width_spaces() {
        assert_eq!(normalize(" 中山路 10\u{3000}號 "), "中山路10號");
        assert_eq!(normalize("單\t3號\n以上"), "單3號以上");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize("  2之 3號\u{3000}附號全");
        assert_eq!(normalize(&once), once);
        assert_eq!(normalize(""), "");
    }
}
