//! Plain-text rendering of a dashboard report.

use intel_reporting::{DashboardReport, DateSelection};

pub fn report_text(report: &DashboardReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(warning) = &report.warning {
        lines.push(format!("WARNING: {warning}"));
        lines.push(String::new());
    }

    lines.push(match report.applied_dates {
        DateSelection::Range { start, end } => format!("Period: {start} to {end}"),
        DateSelection::Incomplete => "Period: all dates (no complete range selected)".to_string(),
    });
    lines.push(format!(
        "Rows: {} marketing, {} business",
        report.filtered.marketing.len(),
        report.filtered.business.len()
    ));
    lines.push(String::new());

    let kpis = &report.kpis;
    lines.push(format!("Marketing Spend     {}", currency(kpis.total_spend, 0)));
    lines.push(format!(
        "Attributed Revenue  {}",
        currency(kpis.total_attributed_revenue, 0)
    ));
    lines.push(format!("ROAS                {:.2}x", kpis.overall_roas));
    lines.push(format!("CAC                 {}", currency(kpis.blended_cac, 0)));
    lines.push(String::new());

    if !report.by_channel.is_empty() {
        let total_spend = kpis.total_spend;
        lines.push(format!(
            "{:<12} {:>14} {:>14} {:>10} {:>12} {:>7} {:>7} {:>7}",
            "Channel", "Spend", "Revenue", "Clicks", "Impressions", "ROAS", "CTR %", "Share %"
        ));
        for c in &report.by_channel {
            let share = if total_spend > 0.0 {
                c.spend / total_spend * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "{:<12} {:>14} {:>14} {:>10} {:>12} {:>7.2} {:>7.2} {:>7.2}",
                c.channel,
                currency(c.spend, 2),
                currency(c.attributed_revenue, 2),
                c.clicks,
                c.impressions,
                c.roas,
                c.ctr,
                share
            ));
        }
        lines.push(String::new());
    }

    if !report.by_day.is_empty() {
        lines.push(format!("{:<12} {:>14} {:>14}", "Date", "Spend", "Revenue"));
        for d in &report.by_day {
            lines.push(format!(
                "{:<12} {:>14} {:>14}",
                d.date.to_string(),
                currency(d.spend, 2),
                currency(d.attributed_revenue, 2)
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// `$1,234` style with the given number of decimals.
fn currency(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, amount.abs());
    let (whole, frac) = match formatted.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    match frac {
        Some(f) => format!("{sign}${grouped}.{f}"),
        None => format!("{sign}${grouped}"),
    }
}
