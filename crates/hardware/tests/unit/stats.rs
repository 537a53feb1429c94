//! Statistics rendering and counters.

use mipsim_core::stats::{CacheStats, STATS_SECTIONS, SimStats};

fn sample() -> SimStats {
    SimStats {
        instructions_retired: 10,
        inst_alu: 5,
        inst_load: 2,
        inst_store: 1,
        inst_branch: 1,
        inst_jump: 0,
        inst_system: 1,
        branches_taken: 1,
        branches_not_taken: 0,
        cache: CacheStats {
            hits: 3,
            misses: 1,
            writebacks: 1,
            flushes: 1,
        },
    }
}

#[test]
fn hit_rate() {
    assert!((sample().cache.hit_rate() - 75.0).abs() < f64::EPSILON);
    assert!(CacheStats::default().hit_rate().abs() < f64::EPSILON);
}

#[test]
fn renders_all_sections_by_default() {
    let text = sample().render_sections(&[]);
    for header in ["SUMMARY", "INSTRUCTION MIX", "BRANCHES", "DATA CACHE"] {
        assert!(text.contains(header), "missing {header}");
    }
    assert!(text.contains("op.alu                 5 (50.00%)"));
    assert!(text.contains("miss_rate: 25.00%"));
}

#[test]
fn renders_selected_sections_only() {
    let text = sample().render_sections(&["branch"]);
    assert!(text.contains("BRANCHES"));
    assert!(!text.contains("SUMMARY"));
    assert!(!text.contains("DATA CACHE"));
}

#[test]
fn section_names_are_all_renderable() {
    for name in STATS_SECTIONS {
        assert!(sample().render_sections(&[*name]).lines().count() > 2);
    }
}

#[test]
fn serializes_nested_cache_counters() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["cache"]["writebacks"], 1);
    assert_eq!(json["inst_alu"], 5);
}
