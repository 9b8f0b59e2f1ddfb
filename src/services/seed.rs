use serde::Serialize;

use crate::model::term::Term;

const SEED_JSON: &str = include_str!("../data/seed_terms.json");

/// Built-in term set written to storage on first-ever access.
pub fn seed_terms() -> Vec<Term> {
    serde_json::from_str(SEED_JSON).expect("built-in seed data is valid JSON")
}

/// Fixed category catalog shown on the home screen. Independent of the
/// categories actually present among stored terms; counts are filled in
/// per request.
#[derive(Debug, Serialize, Clone)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry { id: "general", name: "General Clinical", icon: "ClipboardList" },
    CatalogEntry { id: "symptoms", name: "Symptoms", icon: "Activity" },
    CatalogEntry { id: "body_parts", name: "Body Parts", icon: "User" },
    CatalogEntry { id: "vital_signs", name: "Vital Signs", icon: "HeartPulse" },
    CatalogEntry { id: "pain", name: "Pain Scale", icon: "Thermometer" },
    CatalogEntry { id: "directions", name: "Directions & Instructions", icon: "ArrowRightCircle" },
    CatalogEntry { id: "emergency", name: "Emergency & Trauma", icon: "Siren" },
    CatalogEntry { id: "nursing", name: "Nursing / Home Care", icon: "Heart" },
    CatalogEntry { id: "lab", name: "Lab & Diagnostics", icon: "Microscope" },
    CatalogEntry { id: "meds", name: "Medications", icon: "Pill" },
    CatalogEntry { id: "chronic", name: "Chronic Diseases", icon: "Clock" },
    CatalogEntry { id: "mental", name: "Mental Health", icon: "Brain" },
    CatalogEntry { id: "departments", name: "Hospital Departments", icon: "Building" },
    CatalogEntry { id: "admin", name: "Admin & Insurance", icon: "FileText" },
];
