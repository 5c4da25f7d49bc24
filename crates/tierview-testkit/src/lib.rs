// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// The worked example: one category, a function with a sub-item and a
/// function with only a bracketed marker.
pub const WORKED_EXAMPLE: &str = "cat-a\n\tfunc-1\n\t\tsub-1\n\t\t\tline-1\n\tfunc-2\n\t\t[marker]\n";

/// A realistic outline with a header banner, separators, sub-item and
/// sub-item-less functions, and an empty category.
pub const PERF_OUTLINE: &str = "\
功能名称\t执行参数
--------------------------------
计算处理分析
\tcpu
\t\tusage
\t\t\t-e cycles,instructions
\t\t\t\t--interval 1000
\t\tfreq
\t\t\t-e cpu-clock
\ttopdown
\t\t[level 1]
\t\t\tstage1
\t\t\tstage2
---
pcie接口性能
\ttx
\t\tpkt/s
\t\t\t--dir tx --unit pkt
\t\tGbps
\t\t\t--dir tx --unit gbit
\trx
\t\t[counters]
ddr接口性能
\tbandwidth
\t\tread
\t\twrite
\t\ttotal
reserved
";

const CATEGORY_WORDS: [&str; 8] = [
    "compute", "pcie", "ddr", "network", "storage", "power", "thermal", "cache",
];
const FUNCTION_WORDS: [&str; 10] = [
    "cpu", "topdown", "tx", "rx", "bandwidth", "latency", "iops", "watts", "temps", "misses",
];
const SUB_ITEM_WORDS: [&str; 8] = [
    "usage", "freq", "stage1", "stage2", "read", "write", "total", "peak",
];
const DETAIL_WORDS: [&str; 10] = [
    "-e cycles",
    "--interval 1000",
    "pkt/s",
    "Gbps",
    "--cpu 0-3",
    "read",
    "write",
    "key\tvalue",
    "--json",
    "-a",
];
const NOISE_LINES: [&str; 4] = ["", "---", "   ", "功能 | 执行参数"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Tabs,
    Spaces,
    /// One space short of even, which rounds up to the same level.
    OddSpaces,
    /// A tab for the first level, spaces after it.
    Mixed,
}

impl IndentStyle {
    pub const ALL: [Self; 4] = [Self::Tabs, Self::Spaces, Self::OddSpaces, Self::Mixed];

    pub fn indent(self, level: usize) -> String {
        if level == 0 {
            return String::new();
        }
        match self {
            Self::Tabs => "\t".repeat(level),
            Self::Spaces => "  ".repeat(level),
            Self::OddSpaces => " ".repeat(level * 2 - 1),
            Self::Mixed => format!("\t{}", "  ".repeat(level - 1)),
        }
    }
}

/// Node counts a generated outline must parse into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineShape {
    pub categories: usize,
    pub functions: usize,
    pub sub_items: usize,
    pub details: usize,
    /// Functions that have no sub-items.
    pub bare_functions: usize,
}

impl OutlineShape {
    pub fn entries(&self) -> usize {
        self.categories + self.functions + self.sub_items + self.details
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutline {
    pub text: String,
    pub shape: OutlineShape,
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Generates well-nested outlines from a seed. The same seed always produces
/// the same structure regardless of indentation style.
#[derive(Debug, Clone)]
pub struct OutlineFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl OutlineFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn outline(&mut self, style: IndentStyle) -> GeneratedOutline {
        let mut lines = Vec::new();
        let mut shape = OutlineShape::default();

        let category_count = 1 + self.int_n(4);
        for category_index in 0..category_count {
            self.maybe_noise(&mut lines);
            lines.push(format!("{}-{category_index}", self.pick(&CATEGORY_WORDS)));
            shape.categories += 1;

            for function_index in 0..self.int_n(5) {
                lines.push(format!(
                    "{}{}-{function_index}",
                    style.indent(1),
                    self.pick(&FUNCTION_WORDS)
                ));
                shape.functions += 1;

                if self.rng.bool() {
                    for sub_index in 0..1 + self.int_n(3) {
                        lines.push(format!(
                            "{}{}-{sub_index}",
                            style.indent(2),
                            self.pick(&SUB_ITEM_WORDS)
                        ));
                        shape.sub_items += 1;
                        self.push_details(&mut lines, &mut shape, style, 3);
                    }
                } else {
                    shape.bare_functions += 1;
                    for marker_index in 0..self.int_n(3) {
                        lines.push(format!("{}[marker {marker_index}]", style.indent(2)));
                        shape.details += 1;
                    }
                    self.push_details(&mut lines, &mut shape, style, 3);
                }
                self.maybe_noise(&mut lines);
            }
        }

        let mut text = lines.join("\n");
        text.push('\n');
        GeneratedOutline { text, shape }
    }

    /// Details start at `base` and wander at most two levels deeper.
    fn push_details(
        &mut self,
        lines: &mut Vec<String>,
        shape: &mut OutlineShape,
        style: IndentStyle,
        base: usize,
    ) {
        for _ in 0..self.int_n(4) {
            let level = base + self.int_n(3);
            lines.push(format!("{}{}", style.indent(level), self.pick(&DETAIL_WORDS)));
            shape.details += 1;
        }
    }

    fn maybe_noise(&mut self, lines: &mut Vec<String>) {
        if self.int_n(4) == 0 {
            lines.push(self.pick(&NOISE_LINES).to_owned());
        }
    }

    fn pick<'a>(&mut self, values: &'a [&'a str]) -> &'a str {
        values[self.rng.int_n(values.len())]
    }
}

/// Writes an outline into a fresh temp dir. Keep the dir alive as long as
/// the path is in use.
pub fn temp_outline(text: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let temp = tempfile::tempdir().context("create temp dir for outline")?;
    let path = write_outline(temp.path(), "outline.txt", text)?;
    Ok((temp, path))
}

/// Writes an outline into `dir` and returns its path.
pub fn write_outline(dir: &Path, name: &str, text: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, text).with_context(|| format!("write outline {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{IndentStyle, OutlineFaker, temp_outline, write_outline};
    use anyhow::Result;
    use std::collections::BTreeSet;

    #[test]
    fn same_seed_same_text() {
        let first = OutlineFaker::new(5).outline(IndentStyle::Tabs);
        let second = OutlineFaker::new(5).outline(IndentStyle::Tabs);
        assert_eq!(first, second);
    }

    #[test]
    fn styles_share_structure() {
        let tabs = OutlineFaker::new(11).outline(IndentStyle::Tabs);
        for style in IndentStyle::ALL {
            let other = OutlineFaker::new(11).outline(style);
            assert_eq!(other.shape, tabs.shape, "style {style:?}");
            assert_eq!(other.text.lines().count(), tabs.text.lines().count());
        }
    }

    #[test]
    fn indent_styles_round_to_same_level() {
        assert_eq!(IndentStyle::Tabs.indent(2), "\t\t");
        assert_eq!(IndentStyle::Spaces.indent(2), "    ");
        assert_eq!(IndentStyle::OddSpaces.indent(2), "   ");
        assert_eq!(IndentStyle::Mixed.indent(3), "\t    ");
        for style in IndentStyle::ALL {
            assert_eq!(style.indent(0), "");
        }
    }

    #[test]
    fn variety_across_seeds() {
        let mut texts = BTreeSet::new();
        for seed in 0_u64..20_u64 {
            texts.insert(OutlineFaker::new(seed).outline(IndentStyle::Tabs).text);
        }
        assert!(texts.len() >= 15, "got {}", texts.len());
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(OutlineFaker::new(0).seed(), 1);
    }

    #[test]
    fn int_n() {
        let mut faker = OutlineFaker::new(42);
        for _ in 0..100 {
            let value = faker.int_n(5);
            assert!(value < 5);
        }
    }

    #[test]
    fn write_outline_creates_file() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = write_outline(temp.path(), "outline.txt", "cat\n")?;
        assert_eq!(std::fs::read_to_string(path)?, "cat\n");
        Ok(())
    }

    #[test]
    fn temp_outline_lives_with_its_dir() -> Result<()> {
        let (temp, path) = temp_outline("cat\n")?;
        assert!(path.starts_with(temp.path()));
        assert!(path.exists());
        drop(temp);
        assert!(!path.exists());
        Ok(())
    }
}
