use super::*;

fn def(name: &'static str, aliases: &'static [&'static str]) -> CommandDef {
    CommandDef {
        name,
        aliases,
        usage: "",
        help: "",
    }
}

#[test]
fn exact_beats_prefix_beats_substring() {
    assert_eq!(score_match("tab", "tab"), 100);
    assert!(score_match("ta", "tab") > score_match("ta", "metadata"));
    assert_eq!(score_match("zz", "tab"), 0);
}

#[test]
fn aliases_rank_commands() {
    let defs = [def("search", &["find"]), def("settings", &[]), def("quit", &["q"])];
    let ranked = rank_commands("q", &defs);
    assert_eq!(ranked[0].name, "quit");

    let ranked = rank_commands("se", &defs);
    let names: Vec<&str> = ranked.iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["search", "settings"]);
}

#[test]
fn only_first_word_is_matched() {
    let defs = [def("domain", &[]), def("route", &[])];
    let ranked = rank_commands("domain add example.com", &defs);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].name, "domain");
    assert!(rank_commands("   ", &defs).is_empty());
}
