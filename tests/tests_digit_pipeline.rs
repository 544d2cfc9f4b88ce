// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end pipeline tests through the umbrella facade: stroke capture,
//! normalization, snapshot decoding, layout, rendering and pruning.

use neuroview::prelude::*;

//region Helper Functions

/// An input vector with the first `active` entries firing.
fn sparse_input(active: usize) -> Vec<f32> {
    let mut pixels = vec![0.0_f32; 784];
    for value in pixels.iter_mut().take(active) {
        *value = 0.9;
    }
    pixels
}

fn snapshot_from(response: serde_json::Value) -> ActivationSnapshot {
    ActivationSnapshot::new_from_response_json(&response).expect("Fixture should decode")
}

/// Center of mass of the normalized image along one axis (0 = rows, 1 = cols).
fn center_of_mass(input: &NormalizedInput, axis: usize) -> f32 {
    let side = input.side() as usize;
    let mut weighted = 0.0_f32;
    let mut total = 0.0_f32;
    for row in 0..side {
        for col in 0..side {
            let value = input.value_at(row as u32, col as u32).unwrap_or(0.0);
            let coordinate = if axis == 0 { row } else { col };
            weighted += value * coordinate as f32;
            total += value;
        }
    }
    weighted / total
}

//endregion

#[cfg(test)]
mod test_stroke_to_tensor {
    use super::*;

    #[test]
    fn test_off_center_stroke_normalizes_centered() {
        let mut canvas = InkCanvas::new(280).expect("Canvas should build");
        // A vertical bar drawn well left of center
        canvas.stamp_segment(
            CanvasPoint::new(60.0, 60.0),
            CanvasPoint::new(60.0, 220.0),
            10.0,
        );

        let input = normalize(&canvas, &NormalizerConfig::default()).expect("Ink should normalize");

        assert_eq!(input.len(), 28 * 28);
        assert!(input.pixels().iter().all(|&v| (0.0..=1.0).contains(&v)));
        // Recentering puts the mass at the grid middle regardless of where
        // the stroke sat on the canvas
        assert!((center_of_mass(&input, 0) - 13.5).abs() < 1.5);
        assert!((center_of_mass(&input, 1) - 13.5).abs() < 1.5);
    }

    #[test]
    fn test_tall_stroke_keeps_aspect_ratio() {
        let mut canvas = InkCanvas::new(280).expect("Canvas should build");
        canvas.stamp_segment(
            CanvasPoint::new(140.0, 60.0),
            CanvasPoint::new(140.0, 220.0),
            10.0,
        );

        let input = normalize(&canvas, &NormalizerConfig::default()).expect("Ink should normalize");

        let side = input.side();
        let mut inked_rows = Vec::new();
        let mut inked_cols = Vec::new();
        for row in 0..side {
            for col in 0..side {
                if input.value_at(row, col).unwrap_or(0.0) > 0.0 {
                    inked_rows.push(row);
                    inked_cols.push(col);
                }
            }
        }
        let height = inked_rows.iter().max().unwrap() - inked_rows.iter().min().unwrap() + 1;
        let width = inked_cols.iter().max().unwrap() - inked_cols.iter().min().unwrap() + 1;

        // 28 * 0.71 rounds to 20 cells for the long axis; the thin axis stays thin
        assert!((19..=21).contains(&height), "height was {}", height);
        assert!(width <= 5, "width was {}", width);
    }

    #[test]
    fn test_blank_canvas_reports_no_ink() {
        let canvas = InkCanvas::new(280).expect("Canvas should build");
        let result = normalize(&canvas, &NormalizerConfig::default());
        assert!(matches!(result, Err(NeuroviewError::NoInk)));
    }
}

#[cfg(test)]
mod test_snapshot_to_frame {
    use super::*;

    #[test]
    fn test_full_network_composes_into_a_frame() {
        let snapshot = snapshot_from(serde_json::json!({
            "input_layer": sparse_input(150),
            "hidden_layer1": vec![0.5_f32; 128],
            "hidden_layer2": vec![0.5_f32; 64],
            "output_layer": [0.05, 0.05, 0.05, 0.9, 0.05, 0.05, 0.05, 0.05, 0.05, 0.05],
            "prediction": 3,
            "confidence": 0.9,
        }));

        let mut layout = LayoutCache::new(LayoutConfig::default());
        let frame = compose_frame(
            &snapshot,
            &mut layout,
            &RenderConfig::default(),
            &PruneConfig::default(),
        );

        assert_eq!(frame.layers().len(), 4);
        assert_eq!(frame.connections().len(), 3);
        // Input neurons at or below the render threshold are not drawn at all
        assert_eq!(frame.layers()[0].len(), 150);
        // Hidden and output layers keep every neuron, dimmed or lit
        assert_eq!(frame.layers()[1].len(), 128);
        assert_eq!(frame.layers()[3].len(), 10);
        assert_eq!(frame.prediction(), &PredictionLabel::Class(3));

        // Each layer occupies its own depth lane
        let mut lanes: Vec<f32> = frame
            .layers()
            .iter()
            .map(|layer| layer[0].position.z)
            .collect();
        lanes.dedup();
        assert_eq!(lanes.len(), 4);
    }

    #[test]
    fn test_edge_count_stays_within_budget() {
        let snapshot = snapshot_from(serde_json::json!({
            "input_layer": sparse_input(784),
            "hidden_layer1": vec![0.9_f32; 512],
            "hidden_layer2": vec![0.9_f32; 512],
            "output_layer": vec![0.9_f32; 10],
            "prediction": 0,
            "confidence": 0.5,
        }));

        let mut layout = LayoutCache::new(LayoutConfig::default());
        let prune = PruneConfig::default();
        let frame = compose_frame(
            &snapshot,
            &mut layout,
            &RenderConfig::default(),
            &prune,
        );

        // Every source fires, so each pair contributes sources * top_k edges
        let budget = (784 + 512 + 512) * prune.top_k as usize;
        assert_eq!(frame.drawn_edge_count(), budget);
    }
}

#[cfg(test)]
mod test_session_wiring {
    use super::*;

    fn fixture_response() -> serde_json::Value {
        serde_json::json!({
            "input_layer": [],
            "hidden_layer1": [0.9, 0.05, 0.5, 0.01],
            "output_layer": [0.2, 0.9, 0.1],
            "prediction": "1",
            "confidence": 0.9,
        })
    }

    #[test]
    fn test_default_config_builds_a_working_session() {
        let config = NeuroviewConfig::default();
        config.validate().expect("Defaults should validate");

        let client = InferenceClient::new(&config.service).expect("Client should build");
        let mut session =
            Session::new(&config.session_settings(), client).expect("Session should build");

        session.draw_segment(CanvasPoint::new(130.0, 60.0), CanvasPoint::new(125.0, 220.0));
        let request = session.begin_prediction().expect("Stroke should normalize");
        assert_eq!(
            request.pixels().len(),
            (config.normalizer.target_side * config.normalizer.target_side) as usize
        );

        let frame = session
            .complete_prediction(request.sequence(), snapshot_from(fixture_response()))
            .expect("Response should apply");
        assert_eq!(frame.prediction(), &PredictionLabel::Class(1));
    }

    #[test]
    fn test_session_threads_prune_settings_through() {
        let mut settings = SessionSettings::default();
        settings.prune.top_k = 2;

        let client = InferenceClient::new(&ServiceConfig::default()).expect("Client should build");
        let mut session = Session::new(&settings, client).expect("Session should build");

        session.draw_dot(CanvasPoint::new(140.0, 140.0));
        let request = session.begin_prediction().expect("Dot should normalize");
        let frame = session
            .complete_prediction(request.sequence(), snapshot_from(fixture_response()))
            .expect("Response should apply");

        // Sources 0 and 2 exceed the 0.4 threshold; both wire to the two
        // strongest outputs (1 then 0) and never to the weakest
        let edges = &frame.connections()[1];
        let pairs: Vec<(usize, usize)> = edges
            .iter()
            .map(|edge| (edge.source_index, edge.target_index))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 0), (2, 1), (2, 0)]);
        for edge in edges {
            assert!(edge.opacity <= 0.9 * 0.15 + 1e-6);
        }
    }
}
