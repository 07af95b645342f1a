use crate::core::types::Mode;
use crate::knowledge::store::KnowledgeBase;
use crate::matching::diagnosis::{
    BackwardDiagnosis, Diagnosis, DiagnosisError, DiagnosisRequest, ForwardDiagnosis,
    FORWARD_METHOD,
};
use crate::matching::normalize::normalize;
use crate::matching::scoring::{evaluate, Reasoning};

/// Minimum score for a backward-chaining goal to count as possible
pub const BACKWARD_THRESHOLD: f64 = 0.5;

/// Data-driven diagnosis: every disease with a positive score, best first.
///
/// Excluded diseases and zero scores are dropped. Ties keep the knowledge
/// base's order.
pub fn forward_chain<S: AsRef<str>>(kb: &KnowledgeBase, symptoms: &[S]) -> Vec<ForwardDiagnosis> {
    let user_symptoms = normalize(symptoms, kb.synonyms());
    tracing::debug!("Forward chaining over {} normalized symptoms", user_symptoms.len());

    let mut results: Vec<ForwardDiagnosis> = kb
        .diseases()
        .iter()
        .filter_map(|disease| {
            let result = evaluate(disease, &user_symptoms);
            tracing::debug!("{}: {}", disease.name, result.reasoning);

            match (result.score, result.reasoning) {
                (Some(score), Reasoning::Trace(trace)) if score > 0.0 => Some(ForwardDiagnosis {
                    disease: disease.name.clone(),
                    score,
                    trace,
                    method: FORWARD_METHOD.to_string(),
                }),
                _ => None,
            }
        })
        .collect();

    // Stable sort, descending by raw score
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results
}

/// Goal-driven diagnosis: is the named disease supported by the symptoms?
///
/// # Errors
///
/// Returns [`DiagnosisError::GoalNotFound`] if no disease has exactly this name.
pub fn backward_chain<S: AsRef<str>>(
    kb: &KnowledgeBase,
    symptoms: &[S],
    goal: &str,
) -> Result<BackwardDiagnosis, DiagnosisError> {
    let disease = kb
        .get(goal)
        .ok_or_else(|| DiagnosisError::GoalNotFound(goal.to_string()))?;

    let user_symptoms = normalize(symptoms, kb.synonyms());
    let result = evaluate(disease, &user_symptoms);
    let is_possible = result.score.is_some_and(|s| s >= BACKWARD_THRESHOLD);

    tracing::debug!(
        "Backward chaining on {}: {} (possible: {is_possible})",
        disease.name,
        result.reasoning
    );

    Ok(BackwardDiagnosis {
        disease: disease.name.clone(),
        is_possible,
        trace: result.reasoning,
        method: BackwardDiagnosis::method_for(goal),
    })
}

/// Run a request in the mode it asks for.
///
/// An unknown backward goal is not an error here: it becomes a single
/// [`Diagnosis::NotFound`] entry, matching the HTTP response contract.
///
/// # Errors
///
/// Returns [`DiagnosisError::MissingGoal`] for a backward request without a
/// goal, before any matching runs.
pub fn diagnose(
    kb: &KnowledgeBase,
    request: &DiagnosisRequest,
) -> Result<Vec<Diagnosis>, DiagnosisError> {
    match request.mode {
        Mode::Forward => Ok(forward_chain(kb, &request.symptoms)
            .into_iter()
            .map(Diagnosis::Forward)
            .collect()),
        Mode::Backward => {
            let goal = request
                .goal
                .as_deref()
                .filter(|g| !g.is_empty())
                .ok_or(DiagnosisError::MissingGoal)?;

            match backward_chain(kb, &request.symptoms, goal) {
                Ok(result) => Ok(vec![Diagnosis::Backward(result)]),
                Err(DiagnosisError::GoalNotFound(name)) => {
                    tracing::debug!("Goal '{name}' is not in the knowledge base");
                    Ok(vec![Diagnosis::not_found()])
                }
                Err(e) => Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::disease::DiseaseRecord;
    use crate::core::types::SymptomId;
    use crate::knowledge::synonyms::SynonymTable;

    fn make_test_kb() -> KnowledgeBase {
        KnowledgeBase::new(
            vec![
                DiseaseRecord::new("Flu")
                    .with_required(&["fever", "cough"])
                    .with_optional(&["fatigue"])
                    .with_exclusions(&["pneumonia"]),
                DiseaseRecord::new("Cold")
                    .with_required(&["runny_nose", "cough"])
                    .with_optional(&["sore_throat"]),
                DiseaseRecord::new("Bronchitis").with_required(&["cough", "mucus"]),
                DiseaseRecord::new("Migraine").with_required(&["headache"]),
            ],
            [("high temperature", "fever"), ("runny nose", "runny_nose")]
                .into_iter()
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_forward_scenario_a() {
        let kb = make_test_kb();
        let results = forward_chain(&kb, &["Fever", "Cough "]);

        let flu = &results[0];
        assert_eq!(flu.disease, "Flu");
        assert!((flu.score - 0.8).abs() < 1e-12);
        assert_eq!(
            flu.trace.met_required,
            vec![SymptomId::new("fever"), SymptomId::new("cough")]
        );
        assert_eq!(flu.method, "Forward Chaining");
    }

    #[test]
    fn test_forward_drops_zero_scores() {
        let kb = make_test_kb();
        let results = forward_chain(&kb, &["fever", "cough"]);
        assert!(results.iter().all(|r| r.score > 0.0));
        assert!(!results.iter().any(|r| r.disease == "Migraine"));
    }

    #[test]
    fn test_forward_excludes_vetoed_disease() {
        let kb = make_test_kb();
        let results = forward_chain(&kb, &["fever", "cough", "pneumonia"]);
        assert!(!results.iter().any(|r| r.disease == "Flu"));
        assert!(results.iter().any(|r| r.disease == "Cold"));
    }

    #[test]
    fn test_forward_ties_keep_kb_order() {
        let kb = make_test_kb();
        // Cold scores 1/2.5 = 0.4, Bronchitis 1/2 = 0.5, Flu 1/2.5 = 0.4
        let results = forward_chain(&kb, &["cough"]);
        let names: Vec<&str> = results.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, vec!["Bronchitis", "Flu", "Cold"]);

        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_forward_uses_synonyms() {
        let kb = make_test_kb();
        let results = forward_chain(&kb, &["High Temperature", "cough", "Runny Nose"]);
        assert_eq!(results[0].disease, "Flu");
        assert_eq!(results[1].disease, "Cold");
        assert!((results[1].score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_forward_empty_kb_and_no_matches() {
        let empty = KnowledgeBase::default();
        assert!(forward_chain(&empty, &["fever"]).is_empty());

        let kb = make_test_kb();
        assert!(forward_chain(&kb, &["rash"]).is_empty());
        let none: [&str; 0] = [];
        assert!(forward_chain(&kb, &none).is_empty());
    }

    #[test]
    fn test_backward_scenario_b() {
        let kb = make_test_kb();
        let result = backward_chain(&kb, &["fever"], "Flu").unwrap();
        assert_eq!(result.disease, "Flu");
        assert!(!result.is_possible);
        assert_eq!(result.method, "Backward Chaining (Goal: Flu)");
        assert!((result.trace.trace().unwrap().score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_backward_threshold_is_inclusive() {
        let kb = make_test_kb();
        let result = backward_chain(&kb, &["cough"], "Bronchitis").unwrap();
        assert!(result.is_possible);
    }

    #[test]
    fn test_backward_excluded_goal() {
        let kb = make_test_kb();
        let result = backward_chain(&kb, &["fever", "cough", "pneumonia"], "Flu").unwrap();
        assert!(!result.is_possible);
        assert_eq!(
            result.trace,
            Reasoning::Absent("Excluded because user has pneumonia.".to_string())
        );
    }

    #[test]
    fn test_backward_scenario_d_goal_not_found() {
        let kb = make_test_kb();
        assert_eq!(
            backward_chain(&kb, &["fever"], "Malaria"),
            Err(DiagnosisError::GoalNotFound("Malaria".to_string()))
        );
    }

    #[test]
    fn test_forward_backward_consistency() {
        let kb = make_test_kb();
        let symptoms = ["fever", "cough", "sore throat", "mucus"];
        for forward in forward_chain(&kb, &symptoms) {
            let backward = backward_chain(&kb, &symptoms, &forward.disease).unwrap();
            assert_eq!(backward.trace, Reasoning::Trace(forward.trace.clone()));
        }
    }

    #[test]
    fn test_diagnose_dispatch() {
        let kb = make_test_kb();

        let forward = diagnose(&kb, &DiagnosisRequest::forward(vec!["cough".into()])).unwrap();
        assert_eq!(forward.len(), 3);
        assert!(forward.iter().all(|d| matches!(d, Diagnosis::Forward(_))));

        let backward =
            diagnose(&kb, &DiagnosisRequest::backward(vec!["fever".into()], "Flu")).unwrap();
        assert!(matches!(&backward[..], [Diagnosis::Backward(b)] if b.disease == "Flu"));
    }

    #[test]
    fn test_diagnose_missing_goal() {
        let kb = make_test_kb();
        let mut request = DiagnosisRequest::forward(vec!["fever".into()]);
        request.mode = Mode::Backward;
        assert_eq!(diagnose(&kb, &request), Err(DiagnosisError::MissingGoal));

        request.goal = Some(String::new());
        assert_eq!(diagnose(&kb, &request), Err(DiagnosisError::MissingGoal));
    }

    #[test]
    fn test_diagnose_unknown_goal_is_a_result() {
        let kb = make_test_kb();
        let results =
            diagnose(&kb, &DiagnosisRequest::backward(vec!["fever".into()], "Malaria")).unwrap();
        assert_eq!(results, vec![Diagnosis::not_found()]);
    }

    #[test]
    fn test_synonyms_do_not_leak_between_kbs() {
        let kb = KnowledgeBase::new(
            vec![DiseaseRecord::new("Flu").with_required(&["fever"])],
            SynonymTable::new(),
        )
        .unwrap();
        assert!(forward_chain(&kb, &["high temperature"]).is_empty());
    }
}
