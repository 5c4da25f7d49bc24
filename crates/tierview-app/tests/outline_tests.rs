// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tierview_app::{LoadError, load_outline, parse_str, require_categories};
use tierview_testkit::{IndentStyle, OutlineFaker, PERF_OUTLINE, WORKED_EXAMPLE, temp_outline};

#[test]
fn generated_outlines_keep_every_entry() {
    for seed in 1_u64..=60 {
        let generated = OutlineFaker::new(seed).outline(IndentStyle::Tabs);
        let outcome = parse_str(&generated.text);
        let tree = &outcome.tree;

        assert!(outcome.diagnostics.is_empty(), "seed {seed}: {:?}", outcome.diagnostics);
        assert_eq!(tree.category_count(), generated.shape.categories, "seed {seed}");
        assert_eq!(tree.entry_count(), generated.shape.entries(), "seed {seed}");
        assert_eq!(outcome.accepted_lines, generated.shape.entries(), "seed {seed}");

        let bare = tree
            .categories
            .iter()
            .flat_map(|category| &category.functions)
            .filter(|function| !function.has_sub_items())
            .count();
        assert_eq!(bare, generated.shape.bare_functions, "seed {seed}");
    }
}

#[test]
fn indent_style_does_not_change_the_tree() {
    for seed in 1_u64..=30 {
        let expected = parse_str(&OutlineFaker::new(seed).outline(IndentStyle::Tabs).text).tree;
        for style in IndentStyle::ALL {
            let text = OutlineFaker::new(seed).outline(style).text;
            assert_eq!(parse_str(&text).tree, expected, "seed {seed}, {style:?}");
        }
    }
}

#[test]
fn rendered_outline_parses_back_to_the_same_tree() {
    for seed in 1_u64..=40 {
        let tree = parse_str(&OutlineFaker::new(seed).outline(IndentStyle::Mixed).text).tree;
        let rendered = tree.to_outline();
        assert_eq!(parse_str(&rendered).tree, tree, "seed {seed}");
        assert_eq!(parse_str(&rendered).tree.to_outline(), rendered, "seed {seed}");
    }
}

#[test]
fn ideographic_space_survives_a_render_round_trip() {
    let source = "cat\n\tfunc\n\t\t[\u{3000}opt]\n\t\tsub\n\t\t\t\u{3000}line\n\t\t\t\t\u{3000}deep\n";
    let tree = parse_str(source).tree;
    let sub_item = &tree.categories[0].functions[0].sub_items[0];
    assert_eq!(sub_item.details[0].text, "\u{3000}line");
    assert_eq!(sub_item.details[1].text, "  \u{3000}deep");

    let rendered = tree.to_outline();
    assert_eq!(rendered, source);
    assert_eq!(parse_str(&rendered).tree, tree);
}

#[test]
fn parsing_is_deterministic() {
    let first = parse_str(PERF_OUTLINE);
    let second = parse_str(PERF_OUTLINE);
    assert_eq!(first, second);
}

#[test]
fn perf_outline_shape() {
    let outcome = parse_str(PERF_OUTLINE);
    let tree = &outcome.tree;
    assert!(outcome.diagnostics.is_empty());

    let names = tree
        .categories
        .iter()
        .map(|category| category.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec!["计算处理分析", "pcie接口性能", "ddr接口性能", "reserved"]
    );

    let cpu = tree.function(0, 0).expect("cpu");
    assert_eq!(cpu.sub_item_count(), 2);
    let usage = cpu.sub_item(0).expect("usage");
    assert_eq!(usage.details[0].as_str(), "-e cycles,instructions");
    assert_eq!(usage.details[1].as_str(), "  --interval 1000");

    let topdown = tree.function(0, 1).expect("topdown");
    assert!(!topdown.has_sub_items());
    let details = topdown
        .details
        .iter()
        .map(|detail| detail.as_str())
        .collect::<Vec<_>>();
    assert_eq!(details, vec!["[level 1]", "  stage1", "  stage2"]);

    assert_eq!(tree.function(2, 0).expect("bandwidth").sub_item_count(), 3);
    assert_eq!(tree.category(3).expect("reserved").function_count(), 0);
    assert_eq!(tree.entry_count(), 25);
}

#[test]
fn worked_example_shape() {
    let tree = parse_str(WORKED_EXAMPLE).tree;
    assert_eq!(tree.category_count(), 1);
    let first = tree.function(0, 0).expect("func-1");
    assert_eq!(first.sub_item(0).expect("sub-1").details[0].as_str(), "line-1");
    let second = tree.function(0, 1).expect("func-2");
    assert!(!second.has_sub_items());
    assert_eq!(second.details[0].as_str(), "[marker]");
}

#[test]
fn load_outline_reads_crlf_files() -> Result<()> {
    let (_temp, path) = temp_outline(&WORKED_EXAMPLE.replace('\n', "\r\n"))?;
    let outcome = load_outline(&path)?;
    assert_eq!(outcome.tree, parse_str(WORKED_EXAMPLE).tree);
    Ok(())
}

#[test]
fn load_outline_tolerates_invalid_utf8() -> Result<()> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("latin1.txt");
    std::fs::write(&path, b"caf\xe9\n\tfunc\n")?;

    let tree = load_outline(&path)?.tree;
    assert_eq!(tree.category_count(), 1);
    assert!(tree.categories[0].name.starts_with("caf"));
    assert_eq!(tree.function(0, 0).expect("func").name, "func");
    Ok(())
}

#[test]
fn header_only_file_is_rejected_as_empty() -> Result<()> {
    let (_temp, path) = temp_outline("功能名称\t执行参数\n-----\n\n")?;
    let outcome = load_outline(&path)?;
    assert!(outcome.tree.is_empty());

    let error = require_categories(outcome.tree, &path).expect_err("empty tree");
    assert!(matches!(error, LoadError::EmptyTree { .. }));
    Ok(())
}
