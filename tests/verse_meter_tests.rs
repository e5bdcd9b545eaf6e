//! Verse meter tracking across lines and page breaks
use tengyur_lint::report::Report;
use tengyur_lint::rules::RuleCatalog;
use tengyur_lint::validation::{Options, Validator};

fn check_verses(content: &str) -> String {
    let catalog = RuleCatalog::with_embedded_rules().expect("load built-in rules");
    let options = Options {
        check_verses: true,
        ..Options::default()
    };
    let validator = Validator::new(&catalog, options);
    let mut report = Report::new(Vec::new());
    validator
        .validate_volume(content, 42, "042", &mut report)
        .expect("write report");
    String::from_utf8(report.finish().expect("flush report")).expect("utf-8 report")
}

#[test]
fn test_regular_seven_syllable_verses_stay_quiet() {
    let content = "vol\n[1a]བདག་གིས་སངས་རྒྱས་ཐམས་ཅད་ལ། །ཕྱག་འཚལ་བ་དང་མཆོད་ཅིང་བཤགས། །\n";
    assert_eq!(check_verses(content), "");
}

#[test]
fn test_eight_syllable_verse_flagged_after_seven() {
    let content = "vol\n[1a]བདག་གིས་སངས་རྒྱས་ཐམས་ཅད་ལ། །ཕྱག་འཚལ་བ་དང་དང་མཆོད་ཅིང་བཤགས། །\n";
    let text = check_verses(content);
    assert!(text.contains("verses: verse has 8 syllables while previous one has 7"));
    assert!(text.contains("***ཕྱག་"));
}

#[test]
fn test_six_syllable_verse_flagged_after_seven() {
    let content = "vol\n[1a]བདག་གིས་སངས་རྒྱས་ཐམས་ཅད་ལ། །ཕྱག་འཚལ་བ་མཆོད་ཅིང་བཤགས། །\n";
    let text = check_verses(content);
    assert!(text.contains("verse has 6 syllables while previous one has 7"));
}

#[test]
fn test_verse_spanning_a_page_break_anchors_at_its_start() {
    let content = "vol\n[1a]ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ། །ཀ་ཁ་ག་ང་ཅ་\n[1b]ཆ་ཇ་ཉ་ཏག།\n";
    let text = check_verses(content);
    assert_eq!(
        text,
        "042, l. 2 (1a): verses: verse has 8 syllables while previous one has 7\n  \
         -> ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ། །***ཀ་ཁ་ག་ང་ཅ་\n"
    );
}

#[test]
fn test_loanword_counts_two_syllables() {
    // the first verse only reaches seven if the loanword counts double
    let content = "vol\n[1a]ཀ་ཁ་ག་ང་ཅ་བཛྲ། །ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ་ཉག།\n";
    let text = check_verses(content);
    assert!(text.contains("verse has 8 syllables while previous one has 7"));
}

#[test]
fn test_final_o_suffix_counts_an_extra_syllable() {
    let content = "vol\n[1a]ཀ་ཁ་ག་ང་ཅ་ཆའོ། །ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ་ཉག།\n";
    let text = check_verses(content);
    assert!(text.contains("verse has 8 syllables while previous one has 7"));
}

#[test]
fn test_terminator_without_open_verse_is_ignored() {
    let content = "vol\n[1a]། །ཀ་ཁ་ག་ང་ཅ་ཆ་ཇ། །\n";
    assert_eq!(check_verses(content), "");
}
