//! One fixture corpus per image source format. Each holds `paper.tex`, which
//! includes `figure`, and exactly one source for it.

mod support;

use support::{fixture_path, has_rule, rule, synthesize_dir};
use yare::parameterized;

#[parameterized(
    png = { "png", "figure.eps", &["figure.png"], "convert figure.png eps2:figure.eps" },
    jpg = { "jpg", "figure.eps", &["figure.jpg"], "convert figure.jpg eps2:figure.eps" },
    tree = { "tree", "figure.eps", &["figure.fig"], "fig2dev -L eps figure.fig figure.eps" },
    gpi = { "gpi", "figure.eps", &["figure.fig"], "fig2dev -L eps figure.fig figure.eps" },
    asy = { "asy", "figure.eps", &["figure.asy", "axes.asy", "style.asy"], "ASYMPTOTE_DIR=. asy -f eps -o figure.eps figure.asy" },
    dia = { "dia", "figure.eps", &["figure.fig"], "fig2dev -L eps figure.fig figure.eps" },
    dot = { "dot", "figure.eps", &["figure.dot"], "dot -Teps figure.dot -o figure.eps" },
    dot_via_fig = { "dot-viafig", "figure.eps", &["figure.fig"], "fig2dev -L eps figure.fig figure.eps" },
    fig = { "fig", "figure.eps", &["figure.fig"], "fig2dev -L eps figure.fig figure.eps" },
    fig_depth = { "fig-depth", "figure-depth1_3.eps", &["figure.fig"], "fig2dev -L eps -D +1:3 figure.fig figure-depth1_3.eps" },
    bitmap_beats_graph = { "png-and-dot", "figure.eps", &["figure.png"], "convert figure.png eps2:figure.eps" },
)]
fn test_image_rule(fixture: &str, target: &str, prerequisites: &[&str], command: &str) {
    let outcome = synthesize_dir(fixture_path("producers", fixture));

    let image = rule(&outcome, target);
    assert_eq!(image.prerequisites, prerequisites);
    assert_eq!(image.recipe, vec![command.to_string()]);
    assert!(outcome.document.clean.contains(&target.to_string()));
    assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);

    let dvi = rule(&outcome, "paper.dvi");
    assert_eq!(dvi.prerequisites, vec!["paper.tex", target]);
}

#[parameterized(
    tree = { "tree", "figure.tree", "tree2fig < figure.tree > figure.fig" },
    gpi = { "gpi", "figure.gpi", "gnuplot -e \"set terminal fig color; set output 'figure.fig'\" figure.gpi" },
    dia = { "dia", "figure.dia", "dia -t fig -e figure.fig figure.dia" },
    dot_via_fig = { "dot-viafig", "figure.dot", "dot -Tfig -Grankdir=LR figure.dot -o figure.fig" },
)]
fn test_diagram_intermediate(fixture: &str, source: &str, command: &str) {
    let outcome = synthesize_dir(fixture_path("producers", fixture));

    let fig = rule(&outcome, "figure.fig");
    assert_eq!(fig.prerequisites, vec![source]);
    assert_eq!(fig.recipe, vec![command.to_string()]);
    assert!(outcome.document.clean.contains(&"figure.fig".to_string()));
}

#[test]
fn test_direct_routes_have_no_diagram_intermediate() {
    for fixture in ["png", "dot", "asy", "png-and-dot"] {
        let outcome = synthesize_dir(fixture_path("producers", fixture));
        assert!(!has_rule(&outcome, "figure.fig"), "{} made a fig", fixture);
    }
}

#[test]
fn test_existing_image_needs_no_rule() {
    let outcome = synthesize_dir(fixture_path("producers", "existing"));

    assert!(!has_rule(&outcome, "figure.eps"));
    assert!(outcome.diagnostics.is_empty());
    assert_eq!(
        rule(&outcome, "paper.dvi").prerequisites,
        vec!["paper.tex", "figure.eps"]
    );
}
