//! Built-in reference tables.
//!
//! A demonstration-scale subset of ICD-10-CM covering conditions that appear
//! frequently in discharge summaries, plus keyword rules for their common
//! phrasings. Both tables are plain data; callers may replace either one.

use icd_model::Category::{
    Blood, Cardiovascular, Digestive, Endocrine, Factors, Genitourinary, Infectious, Injury,
    Mental, Neoplasms, Respiratory, Skin, Symptoms,
};
use icd_model::{CatalogEntry, Category, PatternRule};

const CATALOG: &[(&str, &str, Category)] = &[
    ("E11.9", "Type 2 diabetes mellitus without complications", Endocrine),
    ("E11.8", "Type 2 diabetes mellitus with unspecified complications", Endocrine),
    ("E10.9", "Type 1 diabetes mellitus without complications", Endocrine),
    ("E11.65", "Type 2 diabetes mellitus with hyperglycemia", Endocrine),
    ("I10", "Essential (primary) hypertension", Cardiovascular),
    ("I11.9", "Hypertensive heart disease without heart failure", Cardiovascular),
    (
        "I12.9",
        "Hypertensive chronic kidney disease with stage 1 through stage 4 chronic kidney disease, or unspecified chronic kidney disease",
        Cardiovascular,
    ),
    ("E78.5", "Hyperlipidemia, unspecified", Endocrine),
    ("E78.0", "Pure hypercholesterolemia", Endocrine),
    ("E78.2", "Mixed hyperlipidemia", Endocrine),
    ("J44.1", "Chronic obstructive pulmonary disease with acute exacerbation", Respiratory),
    (
        "J44.0",
        "Chronic obstructive pulmonary disease with acute lower respiratory infection",
        Respiratory,
    ),
    ("J45.9", "Asthma, unspecified", Respiratory),
    (
        "J96.90",
        "Respiratory failure, unspecified, unspecified whether with hypoxia or hypercapnia",
        Respiratory,
    ),
    ("J18.9", "Pneumonia, unspecified organism", Respiratory),
    ("N18.6", "End stage renal disease", Genitourinary),
    ("N18.3", "Chronic kidney disease, stage 3 (moderate)", Genitourinary),
    ("N18.4", "Chronic kidney disease, stage 4 (severe)", Genitourinary),
    ("N18.5", "Chronic kidney disease, stage 5", Genitourinary),
    ("N18.9", "Chronic kidney disease, unspecified", Genitourinary),
    ("N39.0", "Urinary tract infection, site not specified", Genitourinary),
    (
        "I25.10",
        "Atherosclerotic heart disease of native coronary artery without angina pectoris",
        Cardiovascular,
    ),
    ("I50.9", "Heart failure, unspecified", Cardiovascular),
    ("I48.91", "Unspecified atrial fibrillation", Cardiovascular),
    ("I21.9", "Acute myocardial infarction, unspecified", Cardiovascular),
    ("I26.99", "Other pulmonary embolism without acute cor pulmonale", Cardiovascular),
    (
        "I82.409",
        "Acute embolism and thrombosis of unspecified deep veins of unspecified lower extremity",
        Cardiovascular,
    ),
    ("F17.210", "Nicotine dependence, cigarettes, uncomplicated", Mental),
    ("F32.9", "Major depressive disorder, single episode, unspecified", Mental),
    ("F41.9", "Anxiety disorder, unspecified", Mental),
    ("F31.9", "Bipolar disorder, unspecified", Mental),
    ("F20.9", "Schizophrenia, unspecified", Mental),
    ("C78.2", "Secondary malignant neoplasm of pleura", Neoplasms),
    ("C78.1", "Secondary malignant neoplasm of mediastinum", Neoplasms),
    ("C78.0", "Secondary malignant neoplasm of lung", Neoplasms),
    ("C50.911", "Malignant neoplasm of unspecified site of right female breast", Neoplasms),
    ("A41.9", "Sepsis, unspecified organism", Infectious),
    ("R65.20", "Severe sepsis without septic shock", Infectious),
    ("A49.9", "Bacterial infection, unspecified", Infectious),
    ("E03.9", "Hypothyroidism, unspecified", Endocrine),
    ("E03.8", "Other specified hypothyroidism", Endocrine),
    ("D64.9", "Anemia, unspecified", Blood),
    ("D50.9", "Iron deficiency anemia, unspecified", Blood),
    ("E66.9", "Obesity, unspecified", Endocrine),
    ("E66.01", "Morbid (severe) obesity due to excess calories", Endocrine),
    ("R50.9", "Fever, unspecified", Symptoms),
    ("R06.02", "Shortness of breath", Symptoms),
    ("R53.83", "Fatigue", Symptoms),
    ("R11.10", "Vomiting, unspecified", Symptoms),
    ("K59.00", "Constipation, unspecified", Digestive),
    ("K92.2", "Gastrointestinal bleeding, unspecified", Digestive),
    ("K21.9", "Gastro-esophageal reflux disease without esophagitis", Digestive),
    ("D69.6", "Thrombocytopenia, unspecified", Blood),
    ("F10.10", "Alcohol use disorder, mild", Mental),
    ("F10.20", "Alcohol use disorder, moderate", Mental),
    ("Z87.891", "Personal history of nicotine dependence", Factors),
    ("Z95.1", "Presence of aortocoronary bypass graft", Factors),
    ("Z51.11", "Encounter for antineoplastic chemotherapy", Factors),
    ("Z66", "Do not resuscitate", Factors),
    ("B19.20", "Unspecified viral hepatitis C without hepatic coma", Infectious),
    ("B18.2", "Chronic viral hepatitis C", Infectious),
    (
        "L97.909",
        "Non-pressure chronic ulcer of unspecified part of unspecified lower leg with unspecified severity",
        Skin,
    ),
    ("L89.90", "Pressure ulcer of unspecified site, unspecified stage", Skin),
    (
        "S72.001A",
        "Fracture of unspecified part of neck of right femur, initial encounter for closed fracture",
        Injury,
    ),
    (
        "S22.43XA",
        "Multiple fractures of ribs, bilateral, initial encounter for closed fracture",
        Injury,
    ),
];

/// (condition, keywords, code, confidence). For a given code the first
/// firing rule wins, so the more specific rule comes first.
const RULES: &[(&str, &[&str], &str, f64)] = &[
    (
        "type 2 diabetes with hyperglycemia",
        &["diabetes", "type 2", "hyperglycemia"],
        "E11.65",
        0.95,
    ),
    (
        "type 2 diabetes with complications",
        &["diabetes", "type 2", "with complications"],
        "E11.8",
        0.95,
    ),
    ("type 2 diabetes", &["diabetes", "type 2"], "E11.9", 0.93),
    ("type 1 diabetes", &["diabetes", "type 1"], "E10.9", 0.93),
    ("diabetes", &["diabetes"], "E11.9", 0.75),
    ("diabetes", &["diabetic"], "E11.9", 0.7),
    ("hypertensive heart disease", &["hypertensive", "heart"], "I11.9", 0.88),
    ("hypertensive kidney disease", &["hypertensive", "kidney"], "I12.9", 0.88),
    ("hypertension", &["high blood pressure"], "I10", 0.85),
    ("hypertension", &["hypertension"], "I10", 0.85),
    ("hypertension", &["elevated bp"], "I10", 0.8),
    ("mixed hyperlipidemia", &["mixed", "hyperlipidemia"], "E78.2", 0.9),
    ("hyperlipidemia", &["hyperlipidemia"], "E78.5", 0.85),
    ("hyperlipidemia", &["dyslipidemia"], "E78.5", 0.8),
    ("hypercholesterolemia", &["high cholesterol"], "E78.0", 0.8),
    ("hypercholesterolemia", &["hypercholesterolemia"], "E78.0", 0.85),
    ("copd with exacerbation", &["chronic obstructive", "exacerbation"], "J44.1", 0.9),
    ("copd with respiratory infection", &["chronic obstructive", "infection"], "J44.0", 0.9),
    ("copd", &["chronic obstructive"], "J44.1", 0.75),
    ("copd", &["emphysema"], "J44.1", 0.7),
    ("asthma", &["asthma"], "J45.9", 0.85),
    ("end stage renal disease", &["end stage", "renal"], "N18.6", 0.92),
    ("chronic kidney disease stage 3", &["kidney", "stage 3"], "N18.3", 0.92),
    ("chronic kidney disease stage 4", &["kidney", "stage 4"], "N18.4", 0.92),
    ("chronic kidney disease stage 5", &["kidney", "stage 5"], "N18.5", 0.92),
    ("chronic kidney disease", &["chronic kidney"], "N18.9", 0.85),
    ("kidney disease", &["renal insufficiency"], "N18.9", 0.75),
    ("urinary tract infection", &["urinary tract infection"], "N39.0", 0.9),
    ("heart failure", &["heart failure"], "I50.9", 0.88),
    ("atrial fibrillation", &["atrial fibrillation"], "I48.91", 0.9),
    ("myocardial infarction", &["myocardial infarction"], "I21.9", 0.9),
    ("myocardial infarction", &["heart attack"], "I21.9", 0.85),
    ("coronary artery disease", &["coronary", "artery"], "I25.10", 0.88),
    ("pulmonary embolism", &["pulmonary embolism"], "I26.99", 0.88),
    ("deep vein thrombosis", &["deep vein thrombosis"], "I82.409", 0.9),
    ("metastatic lung cancer", &["lung", "metastatic"], "C78.0", 0.88),
    ("breast cancer", &["breast", "cancer"], "C50.911", 0.85),
    ("breast cancer", &["breast", "malignant"], "C50.911", 0.85),
    ("sepsis", &["severe sepsis"], "R65.20", 0.9),
    ("sepsis", &["sepsis"], "A41.9", 0.85),
    ("sepsis", &["septicemia"], "A41.9", 0.8),
    ("pneumonia", &["pneumonia"], "J18.9", 0.85),
    ("bacterial infection", &["bacterial", "infection"], "A49.9", 0.85),
    ("iron deficiency anemia", &["iron deficiency"], "D50.9", 0.9),
    ("anemia", &["anemia"], "D64.9", 0.8),
    ("anemia", &["low hemoglobin"], "D64.9", 0.75),
    ("morbid obesity", &["morbid", "obesity"], "E66.01", 0.9),
    ("obesity", &["obesity"], "E66.9", 0.85),
    ("obesity", &["obese"], "E66.9", 0.8),
    ("depression", &["major depressive"], "F32.9", 0.88),
    ("depression", &["depression"], "F32.9", 0.8),
    ("anxiety", &["anxiety"], "F41.9", 0.82),
    ("bipolar disorder", &["bipolar"], "F31.9", 0.85),
    ("alcohol use disorder", &["alcohol", "moderate"], "F10.20", 0.88),
    ("alcohol use disorder", &["alcohol", "abuse"], "F10.10", 0.85),
    ("alcohol use disorder", &["alcohol"], "F10.10", 0.7),
    ("nicotine dependence history", &["history", "nicotine"], "Z87.891", 0.88),
    ("nicotine dependence", &["nicotine"], "F17.210", 0.8),
    ("nicotine dependence", &["smoker"], "F17.210", 0.75),
    ("hip fracture", &["fracture", "femur"], "S72.001A", 0.88),
    ("hip fracture", &["hip", "fracture"], "S72.001A", 0.85),
    ("rib fractures", &["fracture", "ribs"], "S22.43XA", 0.88),
    ("rib fractures", &["rib", "fracture"], "S22.43XA", 0.85),
    ("pressure ulcer", &["pressure ulcer"], "L89.90", 0.9),
    ("pressure ulcer", &["bed sore"], "L89.90", 0.85),
    ("leg ulcer", &["ulcer", "leg"], "L97.909", 0.85),
    ("chronic hepatitis c", &["chronic", "hepatitis c"], "B18.2", 0.9),
    ("hepatitis c", &["hepatitis c"], "B19.20", 0.85),
    ("hypothyroidism", &["hypothyroidism"], "E03.9", 0.85),
    ("hypothyroidism", &["underactive thyroid"], "E03.9", 0.8),
    ("reflux", &["reflux"], "K21.9", 0.82),
    ("reflux", &["gerd"], "K21.9", 0.85),
    ("gastrointestinal bleeding", &["gastrointestinal", "bleeding"], "K92.2", 0.88),
    ("shortness of breath", &["shortness of breath"], "R06.02", 0.88),
    ("fever", &["fever"], "R50.9", 0.8),
    ("fatigue", &["fatigue"], "R53.83", 0.8),
];

/// The built-in catalog, in insertion order.
pub fn builtin_catalog() -> Vec<CatalogEntry> {
    CATALOG
        .iter()
        .map(|&(code, description, category)| CatalogEntry::new(code, description, category))
        .collect()
}

/// The built-in pattern rules, in evaluation order.
pub fn builtin_rules() -> Vec<PatternRule> {
    RULES
        .iter()
        .map(|&(condition, keywords, code, confidence)| {
            PatternRule::new(condition, keywords.iter().copied(), code, confidence)
        })
        .collect()
}
