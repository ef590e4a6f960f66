//! 정규화 — 원시 레코드를 표준 형태로 변환
//!
//! 타임스탬프가 없거나 메시지가 비어 있는 레코드는 사용 불가로 판정하여
//! 폐기합니다. 이는 에러가 아니라 정상적인 경계 동작이며, 이후 단계에는
//! 필수 필드가 보장된 레코드만 도달합니다.

use std::sync::LazyLock;

use regex::Regex;

use logwarden_core::types::{CanonicalRecord, LogLevel, RawRecord};

/// 연속 공백 (한 칸으로 축약)
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static pattern must compile"));

/// 선두의 커널/monotonic 타임스탬프: `[123.456]`
static LEADING_KERNEL_TS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[\d+\.\d+\]\s*").expect("static pattern must compile"));

/// 선두의 `<` / `>` 프레이밍 문자
static LEADING_FRAMING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[<>]+\s*").expect("static pattern must compile"));

/// 메시지를 정제합니다.
///
/// 적용 순서: 공백 축약 -> 선두 `[digits.digits]` 제거 -> 선두 `<`/`>` 제거.
/// 선두 제거 두 단계는 고정점에 도달할 때까지 반복하므로, 이미 정제된
/// 문자열에 다시 적용해도 동일한 문자열이 나옵니다 (멱등성).
pub fn clean_message(message: &str) -> String {
    let mut cleaned = WHITESPACE_RUNS.replace_all(message, " ").into_owned();

    loop {
        let stripped = LEADING_KERNEL_TS.replace(&cleaned, "");
        let stripped = LEADING_FRAMING.replace(&stripped, "").into_owned();
        if stripped == cleaned {
            break;
        }
        cleaned = stripped;
    }

    cleaned.trim().to_owned()
}

/// 원시 레코드를 정규화합니다.
///
/// 타임스탬프가 없거나 메시지가 (정제 후에도) 비어 있으면 `None`을
/// 반환하며, 해당 레코드는 이후 단계에 도달하지 않습니다.
/// 원본 메시지는 정제본과 함께 그대로 보존됩니다.
pub fn normalize(raw: &RawRecord) -> Option<CanonicalRecord> {
    let timestamp = raw.timestamp?;

    let original = raw.message.as_deref().unwrap_or("").trim();
    if original.is_empty() {
        return None;
    }

    let message = clean_message(original);
    if message.is_empty() {
        return None;
    }

    let level = raw
        .level
        .as_deref()
        .map(LogLevel::parse)
        .unwrap_or_default();

    Some(CanonicalRecord {
        timestamp,
        level,
        source: raw.source.clone().unwrap_or_else(|| "Unknown".to_owned()),
        message,
        original_message: original.to_owned(),
        pid: raw.pid,
        hostname: raw.hostname.clone(),
        user: raw.user.clone(),
        event_id: raw.event_id,
        category: raw.category.clone(),
        log_source: raw
            .log_source
            .clone()
            .unwrap_or_else(|| "Unknown".to_owned()),
        unit: raw.unit.clone(),
        computer: raw.computer.clone(),
        raw_data: raw.raw_data.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    #[test]
    fn clean_collapses_whitespace_runs() {
        assert_eq!(clean_message("disk   \t full\n now"), "disk full now");
    }

    #[test]
    fn clean_strips_kernel_timestamp() {
        assert_eq!(
            clean_message("[12345.678901] usb 1-1: device descriptor read error"),
            "usb 1-1: device descriptor read error"
        );
    }

    #[test]
    fn clean_strips_framing_characters() {
        assert_eq!(clean_message(">>> kernel oops"), "kernel oops");
        assert_eq!(clean_message("<6>link is up"), "link is up");
    }

    #[test]
    fn clean_strips_framing_then_timestamp() {
        // framing in front of a kernel timestamp is removed in one call
        assert_eq!(clean_message("<[12.5] oops"), "oops");
    }

    #[test]
    fn clean_is_idempotent() {
        let samples = [
            "[123.456] <6> disk   full",
            ">>> [1.0] warning",
            "plain message",
            "   spaced   out   ",
        ];
        for sample in samples {
            let once = clean_message(sample);
            assert_eq!(clean_message(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn normalize_requires_timestamp() {
        let raw = RawRecord {
            message: Some("disk full".to_owned()),
            ..Default::default()
        };
        assert!(normalize(&raw).is_none());
    }

    #[test]
    fn normalize_requires_nonempty_message() {
        let raw = RawRecord::new(Utc::now(), "   ");
        assert!(normalize(&raw).is_none());
    }

    #[test]
    fn normalize_discards_message_that_cleans_to_nothing() {
        let raw = RawRecord::new(Utc::now(), "<<<>>>");
        assert!(normalize(&raw).is_none());
    }

    #[test]
    fn normalize_defaults_level_and_source() {
        let record = normalize(&RawRecord::new(Utc::now(), "disk full")).unwrap();
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.source, "Unknown");
        assert_eq!(record.log_source, "Unknown");
    }

    #[test]
    fn normalize_uppercases_level() {
        let raw = RawRecord {
            level: Some("error".to_owned()),
            ..RawRecord::new(Utc::now(), "disk full")
        };
        let record = normalize(&raw).unwrap();
        assert_eq!(record.level, LogLevel::Error);
    }

    #[test]
    fn normalize_passes_unrecognized_level_through() {
        let raw = RawRecord {
            level: Some("Audit_Failure".to_owned()),
            ..RawRecord::new(Utc::now(), "logon attempt")
        };
        let record = normalize(&raw).unwrap();
        assert_eq!(record.level.as_str(), "AUDIT_FAILURE");
    }

    #[test]
    fn normalize_preserves_original_message() {
        let raw = RawRecord::new(Utc::now(), "  [12.5]  disk   full  ");
        let record = normalize(&raw).unwrap();
        assert_eq!(record.message, "disk full");
        assert_eq!(record.original_message, "[12.5]  disk   full");
    }

    #[test]
    fn normalize_carries_optional_fields() {
        let raw = RawRecord {
            pid: Some(4242),
            hostname: Some("server-01".to_owned()),
            unit: Some("nginx.service".to_owned()),
            ..RawRecord::new(Utc::now(), "service failed")
        };
        let record = normalize(&raw).unwrap();
        assert_eq!(record.pid, Some(4242));
        assert_eq!(record.hostname.as_deref(), Some("server-01"));
        assert_eq!(record.unit.as_deref(), Some("nginx.service"));
    }

    proptest! {
        #[test]
        fn clean_is_idempotent_for_arbitrary_input(message in ".{0,200}") {
            let once = clean_message(&message);
            prop_assert_eq!(clean_message(&once), once.clone());
        }

        #[test]
        fn clean_never_leaves_double_spaces(message in ".{0,200}") {
            let cleaned = clean_message(&message);
            prop_assert!(!cleaned.contains("  "));
        }
    }
}
