use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 1080,
        height: 1920,
    }
}

fn texts(explanation: &str) -> StackTexts<'_> {
    StackTexts {
        hook: "QUICK QUIZ!",
        question: "Powerhouse of the cell?",
        options: ["Nucleus", "Mitochondria", "Ribosome", "Golgi body"],
        explanation,
        cta: "SUBSCRIBE FOR MORE!",
    }
}

#[test]
fn default_stack_flows_from_pip() {
    let l = QuizLayout::compute(canvas(), &QuizLayoutConfig::default(), &texts("ATP."))
        .unwrap();

    assert_eq!(l.pip, Rect::new(100.0, 150.0, 980.0, 645.0));
    assert_eq!(l.hook.rect.y0, 665.0);
    assert_eq!(l.hook.rect.y1, 795.0);
    assert_eq!(l.question.rect.y0, 825.0);
    assert_eq!(l.question.rect.height(), 150.0);
    assert_eq!(l.options[0].rect.y0, 1025.0);
    assert_eq!(l.options[1].rect.y0, 1155.0);
    assert_eq!(l.options[3].rect.y1, 1515.0);
    assert_eq!(l.timer_label.y0, 1555.0);
    assert_eq!(l.timer_bar.y0, 1665.0);
    assert_eq!(l.timer_bar.y1, 1715.0);
    assert_eq!(l.explanation.rect.y0, 1575.0);
    assert_eq!(l.cta.rect.y0, 1500.0);
}

#[test]
fn stack_scales_with_canvas_height() {
    let small = Canvas {
        width: 540,
        height: 960,
    };
    let l = QuizLayout::compute(small, &QuizLayoutConfig::default(), &texts("ATP."))
        .unwrap();
    assert_eq!(l.pip.y0, 75.0);
    assert_eq!(l.pip.height(), 247.5);
    assert_eq!(l.options[0].rect.y0, 512.5);
    assert_eq!(l.cta.rect.y0, 750.0);
}

#[test]
fn long_question_grows_card_and_pushes_options() {
    let long_q = "Which of the following processes releases the most energy per glucose molecule during cellular respiration in eukaryotic cells?";
    let mut t = texts("ATP.");
    t.question = long_q;
    let l = QuizLayout::compute(canvas(), &QuizLayoutConfig::default(), &t).unwrap();
    assert!(l.question.text.lines > 1);
    assert!(l.question.rect.height() > 150.0);
    assert!(l.question.rect.height() <= 300.0 + 1e-9);
    assert!(l.options[0].rect.y0 > 1025.0);
}

#[test]
fn oversized_explanation_is_a_fatal_safe_zone_error() {
    let huge = "energy ".repeat(500);
    let err = QuizLayout::compute(canvas(), &QuizLayoutConfig::default(), &texts(&huge))
        .unwrap_err();
    assert!(err.is_fatal_layout());
    match err {
        ShortsceneError::SafeZone { element, edge, .. } => {
            assert_eq!(element, "explanation");
            assert_eq!(edge, "bottom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn moderate_explanation_shrinks_to_fit() {
    let text = "Mitochondria run cellular respiration and produce most of the ATP a cell needs, which is why they are called the powerhouse of the cell.";
    let l = QuizLayout::compute(canvas(), &QuizLayoutConfig::default(), &texts(text)).unwrap();
    assert!(l.explanation.text.font_size < 56.0);
    assert!(l.explanation.rect.y1 <= 1740.0 + 1e-9);
}

#[test]
fn tight_safe_zone_rejects_default_stack() {
    let cfg = QuizLayoutConfig {
        safe_zone: SafeZone {
            top: 100.0,
            bottom: 600.0,
            side: 40.0,
        },
        ..QuizLayoutConfig::default()
    };
    let err = QuizLayout::compute(canvas(), &cfg, &texts("ATP.")).unwrap_err();
    assert!(matches!(err, ShortsceneError::SafeZone { edge: "bottom", .. }));

    let cfg = QuizLayoutConfig {
        safe_zone: SafeZone {
            top: 200.0,
            ..SafeZone::default()
        },
        ..QuizLayoutConfig::default()
    };
    let err = QuizLayout::compute(canvas(), &cfg, &texts("ATP.")).unwrap_err();
    assert!(matches!(err, ShortsceneError::SafeZone { ref element, edge: "top", .. } if element == "pip"));
}

#[test]
fn wide_pip_leaves_canvas_sides() {
    let cfg = QuizLayoutConfig {
        metrics: StackMetrics {
            pip_height: 700.0,
            ..StackMetrics::default()
        },
        ..QuizLayoutConfig::default()
    };
    let err = QuizLayout::compute(canvas(), &cfg, &texts("ATP.")).unwrap_err();
    assert!(matches!(err, ShortsceneError::SafeZone { edge: "left", .. }));
}

#[test]
fn config_validation_rejects_negative_gaps() {
    let cfg = QuizLayoutConfig {
        metrics: StackMetrics {
            option_spacing: -5.0,
            ..StackMetrics::default()
        },
        ..QuizLayoutConfig::default()
    };
    assert!(cfg.validate().is_err());
    assert!(QuizLayoutConfig::default().validate().is_ok());
}

#[test]
fn config_deserializes_partial_overrides() {
    let cfg: QuizLayoutConfig =
        serde_json::from_str(r#"{"metrics":{"pip_height":400},"safe_zone":{"bottom":250}}"#)
            .unwrap();
    assert_eq!(cfg.metrics.pip_height, 400.0);
    assert_eq!(cfg.metrics.pip_y, 150.0);
    assert_eq!(cfg.safe_zone.bottom, 250.0);
    assert_eq!(cfg.safe_zone.top, 100.0);
    assert_eq!(cfg.text.char_width_factor, 0.6);
}

#[test]
fn elements_are_listed_in_stack_order() {
    let l = QuizLayout::compute(canvas(), &QuizLayoutConfig::default(), &texts("ATP."))
        .unwrap();
    let names: Vec<_> = l.elements().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names.first(), Some(&"pip"));
    assert_eq!(names.last(), Some(&"cta"));
    assert_eq!(names.len(), 11);
    assert_eq!(l.option_rect(1), Some(l.options[1].rect));
    assert_eq!(l.option_rect(4), None);
}

#[test]
fn pip_envelope_covers_drift_and_wave() {
    let l = QuizLayout::compute(canvas(), &QuizLayoutConfig::default(), &texts("ATP."))
        .unwrap();
    assert_eq!(l.pip_drift.left_x, 50.0);
    assert_eq!(l.pip_drift.right_x, 150.0);
    assert_eq!(l.pip_drift.wave, 15.0);
    assert_eq!(l.pip_bounds(), Rect::new(50.0, 135.0, 1030.0, 660.0));
    assert_eq!(l.elements()[0], ("pip", l.pip_bounds()));
}

#[test]
fn pip_wave_into_the_top_margin_is_fatal() {
    // The resting box clears the margin; the wave crest does not.
    let cfg = QuizLayoutConfig {
        metrics: StackMetrics {
            pip_y: 105.0,
            side_margin: 80.0,
            ..StackMetrics::default()
        },
        safe_zone: SafeZone {
            side: 60.0,
            ..SafeZone::default()
        },
        ..QuizLayoutConfig::default()
    };
    let err = QuizLayout::compute(canvas(), &cfg, &texts("ATP.")).unwrap_err();
    match err {
        ShortsceneError::SafeZone {
            element,
            edge,
            actual_px,
            limit_px,
        } => {
            assert_eq!(element, "pip");
            assert_eq!(edge, "top");
            assert_eq!(actual_px, 90.0);
            assert_eq!(limit_px, 100.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn pip_drift_into_the_side_margin_is_fatal() {
    let cfg = QuizLayoutConfig {
        metrics: StackMetrics {
            pip_edge: 20.0,
            ..StackMetrics::default()
        },
        ..QuizLayoutConfig::default()
    };
    let err = QuizLayout::compute(canvas(), &cfg, &texts("ATP.")).unwrap_err();
    assert!(matches!(err, ShortsceneError::SafeZone { ref element, edge: "left", .. } if element == "pip"));
}

#[test]
fn font_bounds_scale_with_the_canvas() {
    let mut reference = None;
    for (w, h) in [(1080, 1920), (540, 960), (270, 480)] {
        let c = Canvas {
            width: w,
            height: h,
        };
        let k = f64::from(h) / 1920.0;
        let l = QuizLayout::compute(c, &QuizLayoutConfig::default(), &texts("ATP."))
            .unwrap_or_else(|e| panic!("{w}x{h}: {e}"));
        assert!((l.options[0].text.font_size - 40.0 * k).abs() < 1e-9, "{w}x{h}");
        assert!((l.timer_bar.y1 - 1715.0 * k).abs() < 1e-9, "{w}x{h}");
        let lines: Vec<u32> = l.options.iter().map(|o| o.text.lines).collect();
        match &reference {
            None => reference = Some(lines),
            Some(r) => assert_eq!(&lines, r, "{w}x{h}"),
        }
    }
}

#[test]
fn option_text_that_cannot_fit_its_row_is_fatal() {
    let long = "mitochondrial membrane ".repeat(10);
    let mut t = texts("ATP.");
    t.options[2] = &long;
    let err = QuizLayout::compute(canvas(), &QuizLayoutConfig::default(), &t).unwrap_err();
    assert!(err.is_fatal_layout());
    match err {
        ShortsceneError::TextOverflow {
            element,
            needed_px,
            budget_px,
        } => {
            assert_eq!(element, "option_c");
            assert_eq!(budget_px, 60.0);
            assert!(needed_px > budget_px);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn option_text_shrinks_before_it_overflows() {
    let text = "Adenosine triphosphate synthase";
    let mut t = texts("ATP.");
    t.options[0] = text;
    let l = QuizLayout::compute(canvas(), &QuizLayoutConfig::default(), &t).unwrap();
    assert!(l.options[0].text.fits(60.0));
}
