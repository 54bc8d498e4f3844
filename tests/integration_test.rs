// Integration tests for jdmatch
use jdmatch::prelude::*;
use jdmatch::{MatchStrategy, MatchError, SchemaError, StructuralWeights, WeightNormalization};
use jdmatch_core::{FittedState, QueryProjector};
use jdmatch_structural::{Axis, ExtractionError, ResponseExtractor};
use proptest::prelude::*;
use std::sync::Arc;

fn skills_only() -> MatcherConfig {
    MatcherConfig {
        schema: FieldSchema::new(["skills"], Vec::<String>::new()),
        ..MatcherConfig::default()
    }
}

fn creators() -> Vec<CandidateRecord> {
    vec![
        CandidateRecord::new(1u64)
            .with_name("Ava")
            .with_field("Skills", "Video Editing, Color Grading")
            .with_field("Software", vec!["Premiere Pro", "DaVinci Resolve"])
            .with_field("Content Verticals", "Gaming, Tech")
            .with_field("Creative Styles", "Fast-paced")
            .with_field("Platforms", "YouTube, TikTok")
            .with_field("Past Creators", "MrBeast")
            .with_field("Monthly Rate", 3000.0)
            .with_field("Hourly Rate", 80.0)
            .with_field("# of Views by Creators", 1_000_000.0),
        CandidateRecord::new(2u64)
            .with_name("Ben")
            .with_field("Skills", "Storyboarding, Filming, Sound Designing")
            .with_field("Software", "Final Cut Pro")
            .with_field("Content Verticals", "Food & Cooking, Entertainment")
            .with_field("Creative Styles", "Cinematic")
            .with_field("Platforms", "TikTok")
            .with_field("Past Creators", FieldValue::Null)
            .with_field("Monthly Rate", 2500.0)
            .with_field("Hourly Rate", 120.0)
            .with_field("# of Views by Creators", "250000"),
        CandidateRecord::new(3u64)
            .with_name("Cleo")
            .with_field("Skills", "Animation, Motion Graphics")
            .with_field("Software", "After Effects")
            .with_field("Content Verticals", "Education")
            .with_field("Creative Styles", "Minimalist")
            .with_field("Platforms", "YouTube")
            .with_field("Monthly Rate", FieldValue::Null)
            .with_field("Hourly Rate", 60.0)
            .with_field("# of Views by Creators", 50_000.0),
    ]
}

#[test]
fn test_editing_animation_ranking() {
    let matcher = Matcher::new(skills_only()).unwrap();
    matcher
        .load(vec![
            CandidateRecord::new("c1").with_field("skills", "Editing"),
            CandidateRecord::new("c2").with_field("skills", "Editing, Animation"),
        ])
        .unwrap();

    let matches = matcher.rank_text("we need someone skilled in animation").unwrap();
    assert_eq!(matches.results.len(), 2);
    assert_eq!(matches.results[0].id.to_string(), "c2");
    assert!((matches.results[0].score - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
    assert_eq!(matches.results[1].id.to_string(), "c1");
    assert_eq!(matches.results[1].score, 0.0);
}

#[test]
fn test_constant_numeric_field_normalizes_to_zero() {
    let schema = FieldSchema::new(Vec::<String>::new(), ["rate"]);
    let records = vec![
        CandidateRecord::new("a").with_field("rate", 100.0),
        CandidateRecord::new("b").with_field("rate", 100.0),
    ];

    let state = FittedState::fit(&schema, &records).unwrap();
    let bounds = state.bounds_for("rate").unwrap();
    assert_eq!((bounds.min, bounds.max), (100.0, 100.0));
    assert_eq!(state.warnings().len(), 1);

    for record in &records {
        assert_eq!(state.encode(record).unwrap().as_slice(), &[0.0]);
    }
}

#[test]
fn test_structural_skills_overlap() {
    let matcher = Matcher::new(MatcherConfig {
        schema: FieldSchema::new(["skills"], Vec::<String>::new()),
        ..MatcherConfig::default()
    })
    .unwrap();
    matcher
        .load(vec![CandidateRecord::new("c1").with_field("skills", "Python, SQL")])
        .unwrap();

    let query = Criteria::default().with_skills("python, excel");
    let matches = matcher.score_criteria(&query).unwrap();

    // Neither side names a domain, which counts as a domain match
    let result = &matches.results[0];
    assert!((result.sub_scores.skills - 1.0 / 3.0).abs() < 1e-6);
    assert!((result.contributions.get(Axis::Skills) - 0.1).abs() < 1e-6);
    assert_eq!(result.sub_scores.domain, 1.0);
    assert!((result.score - 0.3).abs() < 1e-6);
}

#[test]
fn test_structural_missing_domain_switch() {
    let mut config = skills_only();
    config.structural.weights.match_missing_domain = false;
    let matcher = Matcher::new(config).unwrap();
    matcher
        .load(vec![CandidateRecord::new("c1").with_field("skills", "python")])
        .unwrap();

    let query = Criteria::default().with_skills("python");
    let matches = matcher.score_criteria(&query).unwrap();
    assert_eq!(matches.results[0].sub_scores.domain, 0.0);
    assert!((matches.results[0].score - 0.3).abs() < 1e-6);

    let matcher = Matcher::new(skills_only()).unwrap();
    matcher
        .load(vec![CandidateRecord::new("c1").with_field("skills", "python")])
        .unwrap();
    let matches = matcher.score_criteria(&query).unwrap();
    assert!((matches.results[0].score - 0.5).abs() < 1e-6);
}

#[test]
fn test_full_creator_schema() {
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();
    matcher.load(creators()).unwrap();

    let summary = matcher.summary().unwrap();
    assert_eq!(summary.records, 3);
    assert_eq!(summary.vocabularies.len(), 6);
    assert_eq!(summary.bounds.len(), 3);
    let categorical: usize = summary.vocabularies.iter().map(|(_, n)| n).sum();
    assert_eq!(summary.dim, categorical + 3);

    let matches = matcher
        .rank_text(
            "Hiring a producer for our Food & Cooking channel on TikTok. \
             Must know storyboarding, filming and sound designing.",
        )
        .unwrap();
    assert_eq!(matches.results[0].id, CandidateId::from(2u64));
    assert!(matches.matched.contains_key("Skills"));
    assert!(matches.matched["Platforms"].contains(&"tiktok".to_string()));
}

#[test]
fn test_vector_shape_invariance() {
    let matcher = Matcher::new(MatcherConfig::default()).unwrap();
    matcher.load(creators()).unwrap();
    let snapshot = matcher.snapshot().unwrap();
    let state = snapshot.state();
    let projector = QueryProjector::new();

    for text in ["", "nothing relevant", "animation youtube gaming tiktok after effects"] {
        assert_eq!(projector.project(text, state).dim(), state.dim());
    }
    for vector in snapshot.corpus().vectors() {
        assert_eq!(vector.dim(), state.dim());
    }
    assert_eq!(state.feature_names().len(), state.dim());
}

#[test]
fn test_unseen_tokens_are_ignored() {
    let schema = FieldSchema::new(["skills"], Vec::<String>::new());
    let records = vec![CandidateRecord::new("a").with_field("skills", "editing")];
    let state = FittedState::fit(&schema, &records).unwrap();

    let unseen = CandidateRecord::new("b").with_field("skills", "juggling, editing");
    assert_eq!(state.encode(&unseen).unwrap().as_slice(), &[1.0]);

    let query = QueryProjector::new().project("juggling only", &state);
    assert!(query.is_zero());
}

#[test]
fn test_zero_query_scores_zero_everywhere() {
    let matcher = Matcher::new(skills_only()).unwrap();
    matcher
        .load(vec![
            CandidateRecord::new("a").with_field("skills", "editing"),
            CandidateRecord::new("b").with_field("skills", "animation"),
        ])
        .unwrap();

    let matches = matcher.rank_text("plumbing").unwrap();
    assert!(matches.results.iter().all(|r| r.score == 0.0));
    let ids: Vec<String> = matches.results.iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_top_k_contract() {
    let records: Vec<CandidateRecord> = (0..25)
        .map(|i| {
            let skills = if i % 5 == 0 { "editing, animation" } else { "editing" };
            CandidateRecord::new(i as u64).with_field("skills", skills)
        })
        .collect();

    for shard_size in [0, 4] {
        let matcher = Matcher::new(MatcherConfig {
            top_k: 7,
            parallel_shard_size: shard_size,
            ..skills_only()
        })
        .unwrap();
        matcher.load(records.clone()).unwrap();

        let matches = matcher.rank_text("animation and editing").unwrap();
        assert_eq!(matches.results.len(), 7);
        assert!(matches.results.windows(2).all(|w| w[0].score >= w[1].score));

        // Five exact matches in corpus order, then ties broken by position
        let positions: Vec<usize> = matches.results.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 5, 10, 15, 20, 1, 2]);
    }

    let matcher = Matcher::new(MatcherConfig {
        top_k: 100,
        ..skills_only()
    })
    .unwrap();
    matcher.load(records).unwrap();
    assert_eq!(matcher.rank_text("editing").unwrap().results.len(), 25);
}

#[test]
fn test_determinism() {
    let schema = FieldSchema::default();
    let first = FittedState::fit(&schema, &creators()).unwrap();
    let second = FittedState::fit(&schema, &creators()).unwrap();

    assert_ne!(first.version(), second.version());
    assert_eq!(first.feature_names(), second.feature_names());

    let text = "editing and animation for youtube";
    let projector = QueryProjector::new();
    assert_eq!(projector.project(text, &first), projector.project(text, &second));
    for record in creators() {
        assert_eq!(first.encode(&record).unwrap(), second.encode(&record).unwrap());
    }
}

#[test]
fn test_schema_errors() {
    let matcher = Matcher::new(MatcherConfig {
        schema: FieldSchema::new(["skills", "languages"], Vec::<String>::new()),
        ..MatcherConfig::default()
    })
    .unwrap();
    let err = matcher
        .load(vec![CandidateRecord::new("a").with_field("skills", "editing")])
        .unwrap_err();
    match err {
        MatchError::Core(jdmatch_core::Error::Schema(e)) => assert_eq!(e.field(), Some("languages")),
        other => panic!("unexpected error: {}", other),
    }

    let matcher = Matcher::new(MatcherConfig {
        schema: FieldSchema::new(Vec::<String>::new(), ["rate"]),
        ..MatcherConfig::default()
    })
    .unwrap();
    let err = matcher
        .load(vec![CandidateRecord::new("a").with_field("rate", "about fifty")])
        .unwrap_err();
    assert!(matches!(
        err,
        MatchError::Core(jdmatch_core::Error::Schema(SchemaError::NonNumeric { .. }))
    ));
    assert!(matches!(matcher.summary(), Err(MatchError::NotLoaded)));
}

#[test]
fn test_reload_publishes_new_version() {
    let matcher = Matcher::new(skills_only()).unwrap();
    let v1 = matcher
        .load(vec![CandidateRecord::new("a").with_field("skills", "editing")])
        .unwrap();
    let held = matcher.snapshot().unwrap();

    let v2 = matcher
        .load(vec![
            CandidateRecord::new("a").with_field("skills", "editing"),
            CandidateRecord::new("b").with_field("skills", "animation"),
        ])
        .unwrap();

    assert!(v2 > v1);
    assert_eq!(held.version(), v1);
    assert_eq!(held.records().len(), 1);
    assert_eq!(matcher.rank_text("animation").unwrap().version, v2);
}

#[test]
fn test_match_text_strategies() {
    let records = vec![
        CandidateRecord::new("a")
            .with_field("skills", "Python, SQL")
            .with_field("languages", "English")
            .with_field("domain", "Finance"),
        CandidateRecord::new("b").with_field("skills", "Excel"),
    ];

    let extractor = ResponseExtractor::new("canned", |_: &str| {
        Ok("```json\n{\"required_skills\": \"Python, Excel\", \"required_domain\": \"finance\", \"required_languages\": null}\n```".to_string())
    });
    let matcher = Matcher::new(skills_only())
        .unwrap()
        .with_extractor(Arc::new(extractor));
    matcher.load(records.clone()).unwrap();

    let outcome = matcher.match_text("Finance analyst, Python and Excel").unwrap();
    assert_eq!(outcome.strategy(), MatchStrategy::Structural);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["strategy"], "structural");
    assert_eq!(json["results"][0]["id"], "a");

    let failing = ResponseExtractor::new("down", |_: &str| {
        Err(ExtractionError::Backend("quota exceeded".to_string()))
    });
    matcher.set_extractor(Some(Arc::new(failing)));
    let outcome = matcher.match_text("python").unwrap();
    assert_eq!(outcome.strategy(), MatchStrategy::Vector);
}

#[test]
fn test_renormalized_weights() {
    let mut config = skills_only();
    config.structural.weights = StructuralWeights {
        normalization: WeightNormalization::Renormalize,
        ..StructuralWeights::default()
    };
    let matcher = Matcher::new(config).unwrap();
    matcher
        .load(vec![CandidateRecord::new("a")
            .with_field("skills", "python")
            .with_field("soft_skills", "leadership")
            .with_field("languages", "english")
            .with_field("domain", "finance")])
        .unwrap();

    let query = Criteria::default()
        .with_skills("python")
        .with_soft_skills("leadership")
        .with_languages("english")
        .with_domain("Finance");
    let matches = matcher.score_criteria(&query).unwrap();
    assert!((matches.results[0].score - 1.0).abs() < 1e-5);
}

const SKILL_POOL: &[&str] = &["editing", "animation", "filming", "scripting", "python", "sql"];

fn ranked(matcher: &Matcher, query: &str) -> Vec<(usize, f32)> {
    let matches = matcher.rank_text(query).unwrap();
    matches.results.iter().map(|r| (r.position, r.score)).collect()
}

proptest! {
    #[test]
    fn prop_top_k_over_random_corpora(
        corpus in prop::collection::vec(prop::sample::subsequence(SKILL_POOL, 1..=4), 1..30),
        query in prop::sample::subsequence(SKILL_POOL, 0..=3),
        k in 1usize..10,
    ) {
        let records: Vec<CandidateRecord> = corpus
            .iter()
            .enumerate()
            .map(|(i, skills)| CandidateRecord::new(i as u64).with_field("skills", skills.join(", ")))
            .collect();
        let query = query.join(" and ");

        let mut runs = Vec::new();
        for shard_size in [0, 3] {
            let matcher = Matcher::new(MatcherConfig {
                top_k: k,
                parallel_shard_size: shard_size,
                ..skills_only()
            })
            .unwrap();
            matcher.load(records.clone()).unwrap();
            runs.push(ranked(&matcher, &query));
        }

        let results = &runs[0];
        prop_assert_eq!(results.len(), k.min(records.len()));
        for pair in results.windows(2) {
            let ((pos_a, score_a), (pos_b, score_b)) = (pair[0], pair[1]);
            prop_assert!(score_a >= score_b);
            if score_a == score_b {
                prop_assert!(pos_a < pos_b);
            }
        }
        prop_assert_eq!(&runs[0], &runs[1]);
    }
}
