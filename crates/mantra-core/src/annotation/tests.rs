use super::*;

fn filter(keywords: &[&str]) -> HintFilter {
    HintFilter::new(keywords.iter().map(|s| s.to_string()).collect())
}

#[test]
fn clean_line_keeps_index_marker() {
    let cleaned = clean_line("南無(二合)觀世音(十二)");
    assert_eq!(cleaned.text, "南無觀世音(十二)");
    assert_eq!(cleaned.index_marker.as_deref(), Some("十二"));
}

#[test]
fn clean_line_last_marker_wins() {
    let cleaned = clean_line("阿(一)囉(引)薩(2)");
    assert_eq!(cleaned.text, "阿(一)囉薩(2)");
    assert_eq!(cleaned.index_marker.as_deref(), Some("2"));
}

#[test]
fn clean_line_fullwidth_parens_kept_verbatim() {
    let cleaned = clean_line("唵（引）阿（三）");
    assert_eq!(cleaned.text, "唵阿（三）");
    assert_eq!(cleaned.index_marker.as_deref(), Some("三"));
}

#[test]
fn clean_line_strips_brackets_and_quotes() {
    let cleaned = clean_line("「唵[＊]阿」");
    assert_eq!(cleaned.text, "唵阿");
    assert_eq!(cleaned.index_marker, None);
}

#[test]
fn clean_line_empty_parens_deleted() {
    let cleaned = clean_line("阿()囉");
    assert_eq!(cleaned.text, "阿囉");
    assert_eq!(cleaned.index_marker, None);
}

#[test]
fn clean_line_unbalanced_kept_literally() {
    let cleaned = clean_line("阿(引 囉");
    assert_eq!(cleaned.text, "阿(引 囉");
    let cleaned = clean_line("阿[註");
    assert_eq!(cleaned.text, "阿[註");
}

#[test]
fn clean_line_empty() {
    let cleaned = clean_line("");
    assert_eq!(cleaned.text, "");
    assert_eq!(cleaned.index_marker, None);
}

#[test]
fn extract_single_char() {
    let a = extract_annotation("阿");
    assert_eq!(a.base, "阿");
    assert!(a.hints.is_empty());
    assert!(a.is_well_formed());
}

#[test]
fn extract_multiple_hints() {
    let a = extract_annotation("囉(引)(二合)");
    assert_eq!(a.base, "囉");
    assert_eq!(a.hints, vec!["引", "二合"]);
}

#[test]
fn extract_fullwidth_hint() {
    let a = extract_annotation("嚩（無鉢反轉舌）");
    assert_eq!(a.base, "嚩");
    assert_eq!(a.hints, vec!["無鉢反轉舌"]);
}

#[test]
fn extract_malformed_returns_token_unchanged() {
    for token in ["南無", "阿(引", "阿()", "阿(a(b))", "阿x(引)", ""] {
        let a = extract_annotation(token);
        assert_eq!(a.base, token);
        assert!(a.hints.is_empty(), "token {token}");
    }
    assert!(!extract_annotation("南無").is_well_formed());
}

#[test]
fn hint_filter_substring_match() {
    let f = filter(&["上", "引"]);
    assert!(f.is_hint_removable("上"));
    assert!(f.is_hint_removable("引上"));
    // Over-match: any hint mentioning 上 is dropped.
    assert!(f.is_hint_removable("上聲呼"));
    assert!(!f.is_hint_removable("sa"));
    assert_eq!(f.retain(&["引", "sa", "上", "ha"]), vec!["sa", "ha"]);
}

#[test]
fn hint_filter_empty_keeps_everything() {
    let f = HintFilter::default();
    assert!(!f.is_hint_removable("引"));
}

#[test]
fn footnote_lifted() {
    assert_eq!(take_footnote("唵 阿 (一)"), ("唵 阿", Some("一")));
    assert_eq!(take_footnote("唵阿（二十）  "), ("唵阿", Some("二十")));
}

#[test]
fn footnote_requires_numeral() {
    assert_eq!(take_footnote("唵(引)"), ("唵(引)", None));
    assert_eq!(take_footnote("唵(12)"), ("唵(12)", None));
    assert_eq!(take_footnote("唵"), ("唵", None));
    assert_eq!(take_footnote(""), ("", None));
}

#[test]
fn split_parts_attaches_hint_groups() {
    assert_eq!(
        split_parts("唵(引) 阿(上)(二合)囉  薩"),
        vec!["唵(引)", "阿(上)(二合)", "囉", "薩"]
    );
}

#[test]
fn split_parts_skips_stray_parens() {
    assert_eq!(split_parts("阿 (引 囉)"), vec!["阿", "引", "囉"]);
    assert!(split_parts("  ").is_empty());
}

#[test]
fn split_parts_reports_stray_parens() {
    let (parts, notices) = split_parts_with_notices("阿 (引 囉)");
    assert_eq!(parts, vec!["阿", "引", "囉"]);
    assert_eq!(
        notices,
        vec![
            Notice::MalformedAnnotation {
                token: "(".to_string()
            },
            Notice::MalformedAnnotation {
                token: ")".to_string()
            },
        ]
    );
    assert!(split_parts_with_notices("唵(引) 阿").1.is_empty());
}

#[test]
fn strip_editorial_keeps_parens() {
    assert_eq!(strip_editorial("「唵(引)[＊]阿」"), "唵(引)阿");
    assert_eq!(strip_editorial("阿[註"), "阿[註");
    assert_eq!(strip_editorial(""), "");
}
