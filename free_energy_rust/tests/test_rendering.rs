use free_energy_rust::simulation::{run_exercises, Figure, Trace};
use free_energy_rust::ui::chart::{axis_bounds, axis_labels, final_value_summary};
use free_energy_rust::ui::render::draw_ui;
use free_energy_rust::ui::ViewState;
use free_energy_rust::ExperimentConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::TestBackend, Terminal};

fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_axis_bounds_cover_all_series() {
    let figure = Figure::new("t", "x", "y")
        .with_series("a", Trace::from_xy(&[0.0, 1.0], &[2.0, 4.0]))
        .with_series("b", Trace::from_xy(&[-1.0, 3.0], &[1.0, f64::NAN]));

    let ([x_lo, x_hi], [y_lo, y_hi]) = axis_bounds(&figure).unwrap();
    assert!((x_lo + 1.0).abs() < 1e-12);
    assert!((x_hi - 1.0).abs() < 1e-12, "NaN sample must be ignored");
    assert!(y_lo < 1.0 && y_hi > 4.0);
}

#[test]
fn test_axis_bounds_flat_and_empty() {
    let flat = Figure::new("t", "x", "y").with_series("a", Trace::from_xy(&[0.0, 1.0], &[2.0, 2.0]));
    let (_, [y_lo, y_hi]) = axis_bounds(&flat).unwrap();
    assert!(y_lo < 2.0 && y_hi > 2.0);

    let empty = Figure::new("t", "x", "y").with_series("a", Trace::new());
    assert!(axis_bounds(&empty).is_none());
}

#[test]
fn test_axis_labels() {
    assert_eq!(axis_labels([0.0, 4.0], 3), vec!["0.00", "2.00", "4.00"]);
    assert_eq!(axis_labels([0.0, 1000.0], 2), vec!["0", "1000"]);
    assert!(axis_labels([0.0, 1.0], 0).is_empty());
}

#[test]
fn test_final_value_summary() {
    let figure = Figure::new("t", "x", "y")
        .with_series("phi", Trace::from_xy(&[0.0, 1.0], &[3.0, 1.5]))
        .with_series("empty", Trace::new());
    assert_eq!(final_value_summary(&figure), "phi=1.5000");
}

#[test]
fn test_view_state_wraps() {
    let mut view = ViewState::new(3);
    view.previous();
    assert_eq!(view.selected, 2);
    view.next();
    assert_eq!(view.selected, 0);
    view.select(7);
    assert_eq!(view.selected, 0);
    view.select(1);
    assert_eq!(view.selected, 1);

    let mut none = ViewState::new(0);
    none.next();
    assert_eq!(none.selected, 0);
}

#[test]
fn test_draw_every_figure() {
    let mut config = ExperimentConfig::default();
    config.variance_learning.trials = 20;
    let results = run_exercises(&config, &mut StdRng::seed_from_u64(5)).unwrap();

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    for (selected, result) in results.iter().enumerate() {
        terminal
            .draw(|f| draw_ui(f, &results, selected, "hud line"))
            .unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("hud line"));
        assert!(text.contains(&result.figure.title), "missing title {}", result.figure.title);
        assert!(text.contains("Posterior"));
    }
}
