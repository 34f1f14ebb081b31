use std::fmt::Write as _;
use verilens_analysis::Analysis;
use verilens_analysis::report::summary_line;
use verilens_model::ModelBundle;

/// Human-readable console output for one analysis.
pub fn render_text(analysis: &Analysis) -> String {
    let s = &analysis.signals;
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary_line(analysis));
    let _ = writeln!(out, "{}", analysis.verdict.headline());
    let _ = writeln!(out);
    let _ = writeln!(out, "  risk tier       {}", analysis.verdict.risk_tier);
    let _ = writeln!(
        out,
        "  credibility     {:.1}% ({})",
        s.credibility_percent,
        s.credibility_band.as_str()
    );
    let _ = writeln!(
        out,
        "  emotional bias  {:.1}% ({})",
        s.emotional_bias,
        s.bias_band.as_str()
    );
    let _ = writeln!(out, "  complexity      {}", s.complexity.as_str());
    let _ = writeln!(out, "  words           {}", analysis.word_count);

    if !s.top_terms.is_empty() {
        let terms = s
            .top_terms
            .iter()
            .map(|t| format!("{} ({})", t.term, t.count))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  top terms       {terms}");
    }
    out
}

pub fn render_model_summary(bundle: &ModelBundle) -> String {
    format!(
        "vectorizer: {}\nclassifier: {}\nfeatures:   {}\n",
        bundle.vectorizer().name(),
        bundle.model().name(),
        bundle.dimension()
    )
}
