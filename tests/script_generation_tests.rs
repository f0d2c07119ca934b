use ugsetup::{
    generate, FixedProbe, OperatingSystem, OsResolver, SelectionSet, SetupError, SetupSession,
    Tool, ToolCatalog,
};

fn git_and_node() -> ToolCatalog {
    let mut catalog = ToolCatalog::new();
    // registered node first so catalog order differs from selection order
    catalog
        .register(
            Tool::builder("node", "Node")
                .linux("apt install nodejs")
                .macos("brew install node")
                .windows("winget install OpenJS.NodeJS")
                .build()
                .expect("node tool"),
        )
        .expect("register node");
    catalog
        .register(
            Tool::builder("git", "Git")
                .linux("apt install git")
                .macos("brew install git")
                .build()
                .expect("git tool"),
        )
        .expect("register git");
    catalog
}

fn selected(ids: &[&str]) -> SelectionSet {
    let mut selection = SelectionSet::new();
    for id in ids {
        selection.toggle(*id);
    }
    selection
}

#[test]
fn generation_is_deterministic() {
    let catalog = git_and_node();
    let selection = selected(&["git", "node"]);
    for os in OperatingSystem::ALL {
        let first = generate(os, &selection, &catalog).expect("first run");
        let second = generate(os, &selection, &catalog).expect("second run");
        assert_eq!(first.text, second.text);
        assert_eq!(first, second);
    }
}

#[test]
fn empty_selection_produces_no_script() {
    let catalog = git_and_node();
    let err = generate(OperatingSystem::Macos, &SelectionSet::new(), &catalog)
        .expect_err("empty selection must fail");
    assert!(matches!(err, SetupError::EmptySelection));
}

#[test]
fn unsupported_tool_is_reported_not_fatal() {
    let catalog = git_and_node();
    let result = generate(OperatingSystem::Windows, &selected(&["git"]), &catalog)
        .expect("partial scripts are still produced");

    assert!(result.text.contains("unsupported on windows"));
    assert_eq!(result.unsupported_tools, vec!["git".to_string()]);
    assert_eq!(result.tool_count, 1);
}

#[test]
fn sections_follow_selection_order() {
    let catalog = git_and_node();
    let result = generate(OperatingSystem::Linux, &selected(&["git", "node"]), &catalog)
        .expect("script");

    let git = result.text.find("# Git").expect("git section");
    let node = result.text.find("# Node").expect("node section");
    assert!(git < node);
}

#[test]
fn reselected_tool_moves_to_last_section() {
    let catalog = git_and_node();
    let mut selection = selected(&["git", "node"]);
    selection.toggle("git");
    selection.toggle("git");

    let result = generate(OperatingSystem::Macos, &selection, &catalog).expect("script");
    let git = result.text.find("brew install git").expect("git command");
    let node = result.text.find("brew install node").expect("node command");
    assert!(node < git);
}

#[test]
fn header_and_footer_frame_every_script() {
    let catalog = git_and_node();
    for os in OperatingSystem::ALL {
        let result = generate(os, &selected(&["node"]), &catalog).expect("script");
        let first = result.text.lines().next().expect("header");
        let last = result.text.lines().last().expect("footer");
        match os {
            OperatingSystem::Windows => assert!(first.starts_with("#Requires")),
            _ => assert!(first.starts_with("#!")),
        }
        assert!(result.text.contains(&format!("# Target OS: {}", os.display_name())));
        assert!(last.contains("All tools installed successfully!"));
        assert!(result.text.ends_with('\n'));
    }
}

#[test]
fn explicit_os_choice_beats_detection() {
    let resolver = OsResolver::new(FixedProbe(Some(OperatingSystem::Linux)));
    assert_eq!(resolver.detect(), OperatingSystem::Linux);
    assert_eq!(
        resolver.resolve_active(Some(OperatingSystem::Macos)),
        OperatingSystem::Macos
    );

    let mut session = SetupSession::new(git_and_node(), resolver);
    session.select_os(OperatingSystem::Macos);
    session.toggle_tool("git");
    let result = session.generate().expect("script");
    assert_eq!(result.os, OperatingSystem::Macos);
    assert!(result.text.contains("brew install git"));
}
