//! Fixed sample data for panels whose backing store is not wired up yet.
//!
//! Everything here is served with `"source": "placeholder"`; none of it comes
//! from an agent.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::models::interview::{Candidate, Interview};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub labels: Vec<String>,
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphRelationship {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_node: String,
    pub end_node: String,
    pub properties: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<GraphRelationship>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorCollection {
    pub name: String,
    pub vector_size: u32,
    pub points_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryTier {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Value,
    pub timestamp: String,
}

pub fn database_records(now: DateTime<Utc>) -> Vec<DatabaseRecord> {
    let at = now.to_rfc3339();
    vec![
        DatabaseRecord {
            id: "1".into(),
            kind: "job".into(),
            data: json!({ "title": "Senior Developer", "company": "TechCorp" }),
            timestamp: at.clone(),
        },
        DatabaseRecord {
            id: "2".into(),
            kind: "candidate".into(),
            data: json!({ "name": "John Doe", "skills": ["Python", "React"] }),
            timestamp: at.clone(),
        },
        DatabaseRecord {
            id: "3".into(),
            kind: "resume".into(),
            data: json!({ "score": 85, "analysis": "Strong match" }),
            timestamp: at,
        },
    ]
}

fn node(id: &str, label: &str, name: &str) -> GraphNode {
    GraphNode {
        id: id.into(),
        labels: vec![label.into()],
        properties: json!({ "name": name }),
    }
}

fn edge(id: &str, kind: &str, start: &str, end: &str) -> GraphRelationship {
    GraphRelationship {
        id: id.into(),
        kind: kind.into(),
        start_node: start.into(),
        end_node: end.into(),
        properties: json!({}),
    }
}

pub fn graph() -> GraphSnapshot {
    GraphSnapshot {
        nodes: vec![
            node("1", "Company", "TechCorp Solutions"),
            node("2", "Skill", "Python"),
            node("3", "Candidate", "Sarah Johnson"),
        ],
        relationships: vec![
            edge("1", "REQUIRES", "1", "2"),
            edge("2", "HAS_SKILL", "3", "2"),
        ],
    }
}

pub fn vector_collections() -> Vec<VectorCollection> {
    [
        ("resumes", 150),
        ("job_descriptions", 75),
        ("candidates", 200),
    ]
    .into_iter()
    .map(|(name, points_count)| VectorCollection {
        name: name.into(),
        vector_size: 768,
        points_count,
    })
    .collect()
}

pub fn memory_tiers(now: DateTime<Utc>) -> Vec<MemoryTier> {
    let at = now.to_rfc3339();
    vec![
        MemoryTier {
            kind: "short_term".into(),
            data: json!({ "recent_searches": ["python developer", "ml engineer"] }),
            timestamp: at.clone(),
        },
        MemoryTier {
            kind: "long_term".into(),
            data: json!({ "total_candidates": 150, "successful_hires": 23 }),
            timestamp: at.clone(),
        },
        MemoryTier {
            kind: "episodic".into(),
            data: json!({
                "recent_interviews": ["Sarah Johnson - Hired", "Mike Chen - Pending"]
            }),
            timestamp: at,
        },
    ]
}

pub fn candidates() -> Vec<Candidate> {
    [
        ("1", "John Doe", "john.doe@email.com", "Senior Software Developer", 85.0, "shortlisted"),
        ("2", "Jane Smith", "jane.smith@email.com", "Product Manager", 92.0, "shortlisted"),
        ("3", "Mike Johnson", "mike.johnson@email.com", "Data Analyst", 78.0, "pending"),
    ]
    .into_iter()
    .map(|(id, name, email, job_title, score, status)| Candidate {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        job_title: job_title.into(),
        score,
        status: status.into(),
    })
    .collect()
}

pub fn interviews() -> Vec<Interview> {
    vec![
        Interview {
            id: "1".into(),
            candidate_name: "John Doe".into(),
            job_title: "Senior Software Developer".into(),
            date: "2024-01-15".into(),
            time: "10:00".into(),
            kind: "Technical".into(),
            status: "scheduled".into(),
        },
        Interview {
            id: "2".into(),
            candidate_name: "Jane Smith".into(),
            job_title: "Product Manager".into(),
            date: "2024-01-16".into(),
            time: "14:00".into(),
            kind: "Behavioral".into(),
            status: "completed".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_edges_point_at_known_nodes() {
        let graph = graph();
        for rel in &graph.relationships {
            assert!(graph.nodes.iter().any(|n| n.id == rel.start_node));
            assert!(graph.nodes.iter().any(|n| n.id == rel.end_node));
        }
    }

    #[test]
    fn test_records_serialize_kind_as_type() {
        let value = serde_json::to_value(&database_records(Utc::now())[0]).unwrap();
        assert_eq!(value["type"], "job");
        assert!(value.get("kind").is_none());
    }
}
