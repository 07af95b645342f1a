use std::collections::HashSet;

use serde_json::Value;

const KNOWLEDGE_BASE: &str = "knowledge/medical_kb.json";

fn main() {
    println!("cargo:rerun-if-changed={KNOWLEDGE_BASE}");
    println!("cargo:rerun-if-changed=build.rs");

    let problems = check_knowledge_base();
    assert!(
        problems.is_empty(),
        "\n\nKNOWLEDGE BASE BUILD ERROR in {KNOWLEDGE_BASE}:\n  - {}\n",
        problems.join("\n  - ")
    );
}

/// Every problem found in the embedded knowledge base, so one build reports them all
fn check_knowledge_base() -> Vec<String> {
    let kb: Value = match std::fs::read_to_string(KNOWLEDGE_BASE)
        .map_err(|e| format!("cannot read file: {e}"))
        .and_then(|text| serde_json::from_str(&text).map_err(|e| format!("invalid JSON: {e}")))
    {
        Ok(kb) => kb,
        Err(problem) => return vec![problem],
    };

    let mut problems = Vec::new();

    let synonym_count = match kb.get("synonyms").and_then(Value::as_object) {
        Some(synonyms) => {
            for (phrase, target) in synonyms {
                if !target.is_string() {
                    problems.push(format!("synonym '{phrase}' must map to a string"));
                }
            }
            synonyms.len()
        }
        None => {
            problems.push("missing 'synonyms' object".to_string());
            0
        }
    };

    let Some(diseases) = kb.get("diseases").and_then(Value::as_array) else {
        problems.push("missing 'diseases' array".to_string());
        return problems;
    };

    let mut seen = HashSet::new();
    for (index, disease) in diseases.iter().enumerate() {
        let name = match disease.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                problems.push(format!("disease #{index} has no name"));
                continue;
            }
        };
        if !seen.insert(name) {
            // Backward chaining only ever reaches the first of these
            println!("cargo:warning=Disease '{name}' is defined more than once");
        }

        if disease.get("required").is_none() {
            problems.push(format!("'{name}' has no 'required' list"));
        }
        let required = symptom_list(disease, "required", name, &mut problems);
        let optional = symptom_list(disease, "optional", name, &mut problems);
        symptom_list(disease, "exclusions", name, &mut problems);

        if required + optional == 0 {
            problems.push(format!("'{name}' has no required or optional symptoms"));
        }
    }

    println!(
        "cargo:warning=Validated knowledge base: {} diseases, {synonym_count} synonyms",
        diseases.len()
    );
    problems
}

/// Length of a symptom list; an absent list counts as empty
fn symptom_list(disease: &Value, field: &str, name: &str, problems: &mut Vec<String>) -> usize {
    let Some(value) = disease.get(field) else {
        return 0;
    };
    let Some(list) = value.as_array() else {
        problems.push(format!("'{name}'.{field} must be an array"));
        return 0;
    };
    if list.iter().any(|symptom| !symptom.is_string()) {
        problems.push(format!("'{name}'.{field} contains a non-string entry"));
    }
    list.len()
}
