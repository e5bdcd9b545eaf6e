//! Variant reading annotations through the public API
use tengyur_lint::report::Report;
use tengyur_lint::rules::RuleCatalog;
use tengyur_lint::validation::{resolve_variants, Options, Validator, VariantChoice};

fn check(content: &str, options: Options) -> String {
    let catalog = RuleCatalog::with_embedded_rules().expect("load built-in rules");
    let validator = Validator::new(&catalog, options);
    let mut report = Report::new(Vec::new());
    validator
        .validate_volume(content, 104, "104", &mut report)
        .expect("write report");
    String::from_utf8(report.finish().expect("flush report")).expect("utf-8 report")
}

#[test]
fn test_original_reading_kept_by_default() {
    let resolution = resolve_variants("དཀར་(པོ,པོའི)་ཞེས་", VariantChoice::Original);
    assert_eq!(resolution.text, "དཀར་པོ་ཞེས་");
    assert_eq!(resolution.tsheg_mismatches, 0);
    assert!(!resolution.spurious_parenthesis);
}

#[test]
fn test_corrected_reading_replaces_printed_one() {
    let resolution = resolve_variants("དཀར་(པོ,པོའི)་ཞེས་", VariantChoice::Corrected);
    assert_eq!(resolution.text, "དཀར་པོའི་ཞེས་");
}

#[test]
fn test_every_group_on_a_line_resolves() {
    let resolution = resolve_variants("(ཀ,ཁ)་དང་(ག,ང)་", VariantChoice::Corrected);
    assert_eq!(resolution.text, "ཁ་དང་ང་");
}

#[test]
fn test_tsheg_mismatch_diagnostic_format() {
    let text = check("vol\n[1a](ཀ་,ཁ)ག་\n", Options::default());
    assert_eq!(
        text,
        "104, l. 2 (1a): format: ༺ཚེག་དང་གུག་རྟགས་མི་འགྲིག་པ།༻ tsheg not matching in parenthesis\n"
    );
}

#[test]
fn test_unbalanced_parenthesis_diagnostic_format() {
    let text = check("vol\n[1a]ཀ)ཁ་\n", Options::default());
    assert_eq!(
        text,
        "104, l. 2 (1a): format: ༺གུག་རྟགས་ཆད་པའི་སྐྱོན།༻ spurious parenthesis\n"
    );
}

#[test]
fn test_well_formed_groups_leave_no_trace() {
    let text = check("vol\n[1a]དཀར་(པོ,པོའི)་ཞེས་\n", Options::default());
    assert_eq!(text, "");
    let fixed = check(
        "vol\n[1a]དཀར་(པོ,པོའི)་ཞེས་\n",
        Options {
            fix_errors: true,
            ..Options::default()
        },
    );
    assert_eq!(fixed, "");
}
