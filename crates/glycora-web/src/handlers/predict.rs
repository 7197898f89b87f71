//! Prediction API: scores a measurement record and renders the deviation chart.

use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use glycora_common::{ApiError, MeasurementRecord};
use glycora_ranker::{assess, rank_deviations, round_probability, DeviationEntry, Diagnosis};
use serde::Serialize;

use crate::chart::encode_chart_base64;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub probability: f64,
    pub diagnosis: Diagnosis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
}

/// Turn the extractor result into a record, mapping every schema problem to 400.
fn parse_record(
    payload: Result<Json<MeasurementRecord>, JsonRejection>,
) -> Result<MeasurementRecord, ApiError> {
    let Json(record) = payload.map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;
    record.ensure_finite()?;
    Ok(record)
}

/// The chart is optional: failures are logged and the field is omitted.
async fn render_plot(state: &SharedState, deviations: Vec<DeviationEntry>) -> Option<String> {
    if !state.chart.enabled {
        return None;
    }
    let chart_config = state.chart.clone();
    let timeout = Duration::from_millis(chart_config.timeout_ms);
    let task =
        tokio::task::spawn_blocking(move || encode_chart_base64(&deviations, &chart_config));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(Ok(encoded))) => Some(encoded),
        Ok(Ok(Err(e))) => {
            tracing::warn!("Omitting plot: {}", e);
            None
        }
        Ok(Err(e)) => {
            tracing::warn!("Omitting plot, render task failed: {}", e);
            None
        }
        Err(_) => {
            tracing::warn!("Omitting plot, rendering exceeded {:?}", timeout);
            None
        }
    }
}

/// POST /predict: probability, diagnosis and (when available) the chart.
pub async fn predict(
    State(state): State<SharedState>,
    payload: Result<Json<MeasurementRecord>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let record = parse_record(payload)?;
    let assessment = assess(&record, state.classifier.as_ref(), &state.cutoffs)?;

    tracing::info!(
        "Prediction: probability={:.3}, diagnosis={}",
        assessment.probability,
        assessment.diagnosis
    );

    let plot = render_plot(&state, assessment.deviations).await;

    Ok(Json(PredictResponse {
        probability: round_probability(assessment.probability),
        diagnosis: assessment.diagnosis,
        plot,
    }))
}

/// POST /api/deviations: ranked deviations without calling the model.
pub async fn api_deviations(
    State(state): State<SharedState>,
    payload: Result<Json<MeasurementRecord>, JsonRejection>,
) -> Result<Json<Vec<DeviationEntry>>, ApiError> {
    let record = parse_record(payload)?;
    Ok(Json(rank_deviations(&record, &state.cutoffs)))
}
