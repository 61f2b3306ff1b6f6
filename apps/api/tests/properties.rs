//! End-to-end properties of the extraction, skill and matching core.

use skillmatch_api::extraction::{extract_document, extract_text, RawDocument, RecoveryQuality};
use skillmatch_api::matching::{rank_candidates, score, MatchReport};
use skillmatch_api::skills::extract_skills;
use uuid::Uuid;

fn set(skills: &[&str]) -> Vec<String> {
    skills.iter().map(|s| s.to_string()).collect()
}

fn report(requirements: &[&str], candidates: &[&str]) -> MatchReport {
    score(Uuid::new_v4(), &set(requirements), Uuid::new_v4(), &set(candidates))
}

#[test]
fn skill_extraction_is_pure() {
    let text = "Senior engineer, experienced with Rust, Go; skills: Kubernetes, Terraform (AWS, GCP)";
    assert_eq!(extract_skills(text), extract_skills(text));
}

#[test]
fn contextual_aliases_are_normalized() {
    let skills = extract_skills("proficient in js, ts");
    assert!(skills.contains_ignore_case("JavaScript"));
    assert!(skills.contains_ignore_case("TypeScript"));
    assert!(!skills.iter().any(|s| s == "js" || s == "ts"));
}

#[test]
fn scoring_is_deterministic() {
    let requirements = set(&["Rust", "Docker", "AWS"]);
    let candidates = set(&["docker", "Python"]);
    let id = Uuid::new_v4();
    assert_eq!(
        score(id, &requirements, id, &candidates),
        score(id, &requirements, id, &candidates)
    );
}

#[test]
fn matches_cover_every_requirement_in_order() {
    let requirements = ["Scala", "SQL", "Kafka", "Spark"];
    let r = report(&requirements, &["sql", "Spark"]);

    assert_eq!(r.skill_matches.len(), requirements.len());
    let order: Vec<&str> = r.skill_matches.iter().map(|m| m.skill.as_str()).collect();
    assert_eq!(order, requirements);

    let missing: Vec<String> = r
        .skill_matches
        .iter()
        .filter(|m| !m.found_in_candidate)
        .map(|m| m.skill.clone())
        .collect();
    assert_eq!(r.skill_gaps, missing);
    assert_eq!(r.skill_gaps, vec!["Scala", "Kafka"]);
}

#[test]
fn empty_requirements_score_zero() {
    let r = report(&[], &["React", "Vue"]);
    assert_eq!(r.match_score_percent, 0);
    assert!(r.skill_matches.is_empty());
}

#[test]
fn identical_sets_score_full() {
    let skills = ["GraphQL", "PostgreSQL"];
    let r = report(&skills, &skills);
    assert_eq!(r.match_score_percent, 100);
    assert!(r.skill_gaps.is_empty());
}

#[test]
fn membership_ignores_case() {
    let r = report(&["AWS"], &["aws"]);
    assert!(r.skill_matches[0].found_in_candidate);
}

#[test]
fn two_of_three_requirements() {
    let r = report(&["React", "Node.js", "AWS"], &["React", "Python", "AWS"]);
    assert_eq!(r.match_score_percent, 67);
    assert_eq!(r.skill_gaps, vec!["Node.js"]);
}

#[test]
fn ranking_keeps_ties_in_input_order() {
    let requirements = ["React", "Node.js", "AWS", "Docker", "SQL"];
    let first = report(&requirements, &["React", "Node.js", "AWS", "Docker"]);
    let second = report(&requirements, &["Node.js", "AWS", "Docker", "SQL"]);
    assert_eq!(first.match_score_percent, 80);
    assert_eq!(second.match_score_percent, 80);

    let (first_id, second_id) = (first.candidate_set_id, second.candidate_set_id);
    let ranked = rank_candidates(vec![first, second]);
    assert_eq!(ranked[0].candidate_set_id, first_id);
    assert_eq!(ranked[1].candidate_set_id, second_id);
}

#[test]
fn structural_keywords_do_not_leak_as_text() {
    let buffer = "endobj stream xref ".repeat(64);
    assert_eq!(extract_text(buffer.as_bytes(), "cv.pdf").unwrap(), "");

    let document = RawDocument::new(buffer.into_bytes(), "cv.pdf").unwrap();
    let extracted = extract_document(&document).unwrap();
    assert_eq!(extracted.recovery_quality, RecoveryQuality::Empty);
    assert!(extracted.is_empty());
}
