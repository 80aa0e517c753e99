//! Console rendering of predictions and comparisons

use super::chart::{bar_rows, BarRow, DEFAULT_BAR_WIDTH};
use super::json::{ComparisonReport, OptimizeReport, PREDICTED_LABEL};
use crate::client::{HealthStatus, MethodMetrics, MethodOutcome};
use crate::fmt::{
    format_bytes, format_delta, format_processing_time, format_runtime, CHART, CHECKMARK,
    CROSSMARK, INFO, LIGHTNING, MICROSCOPE, PACKAGE, SPARKLES, TROPHY, WARNING,
};
use crate::passes::{catalog, PassClassification, PassList};
use crate::scoring::{Champion, Improvement, Winner};
use crate::session::SessionRecord;
use chrono::{DateTime, Utc};
use console::style;

/// How many features the optimize view lists
const TOP_FEATURES: usize = 10;

/// Print the backend status line
pub fn print_health(status: &HealthStatus, url: &str) {
    if status.available {
        let version = status
            .version
            .as_deref()
            .map(|v| format!(" v{}", v))
            .unwrap_or_default();
        println!(
            "{} Backend {} at {}{}",
            CHECKMARK,
            style("online").green().bold(),
            style(url).cyan(),
            version
        );
        if let Some(service) = &status.service {
            println!("   Service: {}", service);
        }
    } else {
        println!(
            "{} Backend {} at {}",
            CROSSMARK,
            style("offline").red().bold(),
            style(url).cyan()
        );
        println!("   {}", style(&status.detail).dim());
    }
}

/// Print a prediction
pub fn print_optimize(report: &OptimizeReport) {
    println!(
        "\n{} {}",
        SPARKLES,
        style("Predicted Optimization Passes").bold()
    );
    println!("   File:  {}", style(&report.file_name).cyan());
    println!("   Model: {}", report.model_used);
    if let Some(ms) = report.processing_time_ms {
        println!("   Processing time: {}", format_processing_time(ms));
    }

    println!();
    print_numbered_passes(&report.predicted_passes);

    let features = report.top_features(TOP_FEATURES);
    if !features.is_empty() {
        println!(
            "\n{} Top features ({} of {})",
            CHART,
            features.len(),
            report.features.len()
        );
        let width = features.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in features {
            println!("   {:<width$}  {:>12.4}", name, value, width = width);
        }
    }

    println!(
        "\n{} Run {} to measure these passes against LLVM",
        INFO,
        style("iris compare").cyan()
    );
}

fn print_numbered_passes(passes: &PassList) {
    if passes.is_empty() {
        println!("   {}", style("(no passes predicted)").dim());
        return;
    }
    for (index, pass) in passes.iter().enumerate() {
        println!(
            "   {:>3}. {:<28} {}",
            index + 1,
            style(pass.as_str()).bold(),
            style(catalog::describe(pass.as_str())).dim()
        );
    }
}

/// Print the full comparison view
pub fn print_comparison(report: &ComparisonReport, pass_detail: bool) {
    println!(
        "\n{} {}",
        CHART,
        style("Comparison Results").bold().underlined()
    );
    println!(
        "   File: {}  Model: {}",
        style(&report.file_name).cyan(),
        report.model_used
    );

    println!();
    print_method_card(PREDICTED_LABEL, &report.predicted);
    for baseline in &report.baselines {
        match &baseline.outcome {
            MethodOutcome::Measured(metrics) => {
                print_method_card(&baseline.level.label(), metrics);
            }
            MethodOutcome::Failed { error } => {
                println!(
                    "{} {} {}",
                    WARNING,
                    style(baseline.level.label()).bold(),
                    style(format!("failed: {}", error)).red()
                );
            }
        }
    }

    print_pass_analysis(&report.pass_analysis, pass_detail);
    print_charts(report);
    print_improvements(report);
    print_winner(report);

    if let Some(total) = report.total_processing_time {
        println!("\n   Total processing time: {:.2}s", total);
    }
}

fn print_method_card(label: &str, metrics: &MethodMetrics) {
    let sample = &metrics.sample;
    let size = metrics
        .binary_size_human
        .clone()
        .unwrap_or_else(|| format_bytes(sample.binary_size));
    let runtime = match sample.runtime_std {
        Some(std) => format!("{} ± {}", format_runtime(sample.runtime_mean), format_runtime(std)),
        None => format_runtime(sample.runtime_mean),
    };

    println!("{} {}", style("▸").cyan(), style(label).bold());
    println!("   Binary size: {}", size);
    println!("   Runtime:     {}", runtime);
    if let Some(count) = sample.num_passes {
        println!("   Passes:      {}", count);
    }
}

/// Print the pass-sequence analysis panel
pub fn print_pass_analysis(analysis: &PassClassification, detail: bool) {
    let llvm_unique = analysis.unique_to_references();

    println!("\n{} {}", MICROSCOPE, style("Pass Sequence Analysis").bold());
    println!(
        "   ML passes: {}   Common with LLVM: {}   ML unique: {}   LLVM unique: {}",
        style(analysis.predicted().len()).bold(),
        style(analysis.common_to_any().len()).green(),
        style(analysis.unique_to_predicted().len()).magenta(),
        style(llvm_unique.len()).yellow()
    );

    if !detail {
        return;
    }

    for reference in analysis.references() {
        println!(
            "\n   {} vs LLVM -{} ({} shared, {} only in LLVM)",
            PREDICTED_LABEL,
            reference.name,
            reference.common.len(),
            reference.unique.len()
        );
        print_pass_group("common", &reference.common);
        print_pass_group("LLVM only", &reference.unique);
    }
    print_pass_group("ML only", analysis.unique_to_predicted());
}

fn print_pass_group(title: &str, passes: &PassList) {
    if passes.is_empty() {
        return;
    }
    println!("     {}: {}", style(title).dim(), passes.join(", "));
}

fn print_charts(report: &ComparisonReport) {
    let predicted = &report.predicted.sample;
    let mut sizes = vec![(PREDICTED_LABEL.to_string(), predicted.binary_size as f64)];
    let mut runtimes = vec![(PREDICTED_LABEL.to_string(), predicted.runtime_mean)];
    for baseline in &report.baselines {
        if let Some(metrics) = baseline.outcome.metrics() {
            sizes.push((baseline.level.label(), metrics.sample.binary_size as f64));
            runtimes.push((baseline.level.label(), metrics.sample.runtime_mean));
        }
    }

    println!("\n{} {}", PACKAGE, style("Binary Size").bold());
    let size_champion = report.champions.binary_size.as_ref();
    for line in chart_lines(&sizes, size_champion, |v| format_bytes(v as u64)) {
        println!("{}", line);
    }

    println!("\n{} {}", LIGHTNING, style("Runtime").bold());
    for line in chart_lines(&runtimes, report.champions.runtime.as_ref(), format_runtime) {
        println!("{}", line);
    }
}

/// Render chart rows, marking the row whose label names `champion`
pub fn chart_lines(
    entries: &[(String, f64)],
    champion: Option<&Champion>,
    format_value: impl Fn(f64) -> String,
) -> Vec<String> {
    let borrowed: Vec<(&str, f64)> = entries.iter().map(|(l, v)| (l.as_str(), *v)).collect();
    let index = champion.and_then(|c| borrowed.iter().position(|(label, _)| *label == c.name));
    let rows = bar_rows(&borrowed, index, DEFAULT_BAR_WIDTH);
    let label_width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);

    rows.iter()
        .map(|row| render_row(row, label_width, &format_value))
        .collect()
}

fn render_row(row: &BarRow, label_width: usize, format_value: &impl Fn(f64) -> String) -> String {
    let bar = if row.champion {
        style(row.bar()).green().to_string()
    } else {
        style(row.bar()).dim().to_string()
    };
    let marker = if row.champion { " ◀ best" } else { "" };
    format!(
        "   {:<width$} {} {}{}",
        row.label,
        bar,
        format_value(row.value),
        marker,
        width = label_width
    )
}

fn print_improvements(report: &ComparisonReport) {
    if report.scores.baselines.is_empty() {
        return;
    }
    println!("\n{} {}", SPARKLES, style("ML vs LLVM").bold());
    for baseline in &report.scores.baselines {
        println!(
            "   vs {:<3}  size {}  runtime {}",
            baseline.name,
            improvement_badge(baseline.improvement.binary_size_delta_pct),
            improvement_badge(baseline.improvement.runtime_delta_pct)
        );
        print_absolute_deltas(&baseline.improvement);
    }
}

fn print_absolute_deltas(improvement: &Improvement) {
    println!(
        "           {:+} bytes, {:+.2} ms",
        improvement.binary_size_delta_abs,
        improvement.runtime_delta_abs * 1000.0
    );
}

/// Delta badge: green for an improvement, red otherwise
pub fn improvement_badge(percent: f64) -> String {
    let text = format_delta(percent);
    if percent < 0.0 {
        style(text).green().to_string()
    } else {
        style(text).red().to_string()
    }
}

fn print_winner(report: &ComparisonReport) {
    let summary = &report.scores.summary;
    let headline = match summary.winner {
        Winner::Predicted => style(format!("{} Wins!", summary.winner)).green().bold(),
        Winner::Baseline => style(format!("{} Wins!", summary.winner)).yellow().bold(),
    };

    println!("\n{} {}", TROPHY, headline);
    println!(
        "   Score: {:.1} / {}  (win rate {:.0}%)",
        summary.score, summary.baselines, summary.win_rate
    );
    if let Some(champion) = &report.champions.binary_size {
        println!("   Smallest binary: {}", champion.name);
    }
    if let Some(champion) = &report.champions.runtime {
        println!("   Fastest runtime: {}", champion.name);
    }
}

/// Print the stored session
pub fn print_session(record: &SessionRecord, now: DateTime<Utc>) {
    let age = record.age_hours(now);
    let expired = record.is_expired(now);

    println!("{} {}", INFO, style("Stored prediction").bold());
    println!("   Session:  {}", record.session_id);
    println!("   File:     {}", style(&record.file_name).cyan());
    println!("   Model:    {}", record.model_used);
    println!("   Passes:   {}", record.predicted_passes.len());
    println!("   Created:  {}", record.timestamp.to_rfc3339());
    if expired {
        println!(
            "   Age:      {} {}",
            style(format!("{:.1}h", age)).red(),
            style("(expired, run 'iris optimize' again)").dim()
        );
    } else {
        println!("   Age:      {:.1}h", age);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).to_string()
    }

    #[test]
    fn test_improvement_badge_direction() {
        assert_eq!(plain(&improvement_badge(-10.0)), "↓ 10.0%");
        assert_eq!(plain(&improvement_badge(2.5)), "↑ 2.5%");
    }

    #[test]
    fn test_chart_lines_mark_champion() {
        let entries = vec![
            ("ML-Predicted".to_string(), 2048.0),
            ("LLVM -O2".to_string(), 4096.0),
        ];
        let champion = Champion {
            name: "ML-Predicted".to_string(),
            value: 2048.0,
        };
        let lines: Vec<String> = chart_lines(&entries, Some(&champion), |v| format_bytes(v as u64))
            .iter()
            .map(|l| plain(l))
            .collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("2.00 KB"));
        assert!(lines[0].ends_with("◀ best"));
        assert!(!lines[1].contains("best"));
    }

    #[test]
    fn test_chart_lines_follow_report_champion() {
        let entries = vec![
            ("ML-Predicted".to_string(), 0.012),
            ("LLVM -O3".to_string(), 0.008),
        ];
        let champion = Champion {
            name: "LLVM -O3".to_string(),
            value: 0.008,
        };
        let lines: Vec<String> = chart_lines(&entries, Some(&champion), format_runtime)
            .iter()
            .map(|l| plain(l))
            .collect();
        assert!(!lines[0].contains("best"));
        assert!(lines[1].ends_with("◀ best"));

        let unmatched = Champion {
            name: "LLVM -O1".to_string(),
            value: 0.001,
        };
        let lines = chart_lines(&entries, Some(&unmatched), format_runtime);
        assert!(lines.iter().all(|l| !plain(l).contains("best")));
    }

    #[test]
    fn test_chart_lines_align_labels() {
        let entries = vec![("A".to_string(), 1.0), ("LONGER".to_string(), 2.0)];
        let lines: Vec<String> = chart_lines(&entries, None, |v| format!("{v}"))
            .iter()
            .map(|l| plain(l))
            .collect();
        assert!(lines[0].starts_with("   A      "));
    }
}
