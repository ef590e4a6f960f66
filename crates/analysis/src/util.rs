//! 유틸리티 — 텍스트 처리 및 반올림 헬퍼

/// 텍스트를 최대 길이(문자 수)로 자르고 말줄임표를 붙입니다.
///
/// UTF-8 경계를 존중하기 위해 바이트가 아닌 문자 단위로 자릅니다.
pub fn truncate_chars(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// 첫 문자를 대문자로 변환합니다.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 소수점 둘째 자리로 반올림합니다 (리포트 표시용 퍼센트 값).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("disk full", 100), "disk full");
    }

    #[test]
    fn truncate_long_text_appends_ellipsis() {
        let text = "x".repeat(200);
        let truncated = truncate_chars(&text, 150);
        assert_eq!(truncated.chars().count(), 150);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncate_exact_boundary_unchanged() {
        let text = "y".repeat(150);
        assert_eq!(truncate_chars(&text, 150), text);
    }

    #[test]
    fn truncate_multibyte_respects_char_boundaries() {
        let text = "ф".repeat(200);
        let truncated = truncate_chars(&text, 150);
        assert_eq!(truncated.chars().count(), 150);
    }

    #[test]
    fn capitalize_first_ascii() {
        assert_eq!(capitalize_first("disk full"), "Disk full");
    }

    #[test]
    fn capitalize_first_empty() {
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn capitalize_first_multibyte() {
        assert_eq!(capitalize_first("їжак у журналі"), "Їжак у журналі");
    }

    #[test]
    fn round2_truncates_noise() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }
}
