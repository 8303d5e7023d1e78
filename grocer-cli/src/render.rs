//! Terminal rendering of analytics payloads.

use std::fmt::Write;

use colored::*;

use grocer_client::CacheStats;
use grocer_core::{
    total_predicted, CategoryForecast, ForecastPoint, Product, ProductForecast, SalesRangeReport,
    StatsSummary, StockRecommendation, TopProduct,
};
use grocer_dashboard::{DashboardState, ForecastOutcome, MetricStatus, SystemMetric};

pub fn stats(stats: &StatsSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "📊 Store statistics".cyan().bold());
    let _ = writeln!(out, "   {} {}", "Units sold:".dimmed(), stats.total_sales_quantity);
    let _ = writeln!(out, "   {} {}", "Orders:".dimmed(), stats.total_orders);
    let _ = writeln!(out, "   {} {:.1}", "Daily average:".dimmed(), stats.average_daily_sales);
    let _ = writeln!(
        out,
        "   {} {} ({} units)",
        "Busiest day:".dimmed(),
        stats.busiest_day,
        stats.busiest_day_sales
    );
    if let Some(models) = stats.ml_models_cached {
        let _ = writeln!(out, "   {} {}", "Cached models:".dimmed(), models);
    }
    out
}

pub fn top_products(products: &[TopProduct]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "🏆 Best sellers".cyan().bold());
    if products.is_empty() {
        let _ = writeln!(out, "   {}", "No sales recorded.".yellow());
    }
    for (rank, p) in products.iter().enumerate() {
        let _ = writeln!(
            out,
            "   {:>2}. {:<30} {:>8} sold  {:>10.2} revenue",
            rank + 1,
            p.product_name,
            p.total_sold,
            p.revenue()
        );
    }
    out
}

pub fn products(products: &[Product]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", "📦 Products".cyan().bold(), products.len());
    for p in products {
        let _ = writeln!(
            out,
            "   #{:<6} {:<30} {:>8.2}  {} {}",
            p.product_id,
            p.product_name,
            p.price,
            "category".dimmed(),
            p.category_id
        );
    }
    out
}

fn series(out: &mut String, points: &[ForecastPoint]) {
    let peak = points.iter().map(|p| p.predicted_sales).max().unwrap_or(0).max(1);
    for p in points {
        let width = (u128::from(p.predicted_sales) * 30 / u128::from(peak)) as usize;
        let _ = writeln!(
            out,
            "   {}  {:>6}  {}",
            p.date,
            p.predicted_sales,
            "█".repeat(width).green()
        );
    }
    let _ = writeln!(out, "   {} {}", "Total:".dimmed(), total_predicted(points));
}

pub fn forecast(outcome: &ForecastOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "🔮 7-day sales forecast".cyan().bold());
    if let Some(warning) = &outcome.warning {
        let _ = writeln!(out, "   {} {}", "⚠️ ".yellow(), warning.yellow());
    }
    series(&mut out, &outcome.points);
    out
}

pub fn product_forecast(forecast: &ProductForecast) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} (#{})",
        "🔮 Forecast for".cyan().bold(),
        forecast.product_name,
        forecast.product_id
    );
    if let Some(model) = &forecast.model {
        let _ = writeln!(out, "   {} {}", "Model:".dimmed(), model);
    }
    series(&mut out, &forecast.data);
    out
}

pub fn category_forecast(forecast: &CategoryForecast) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        "🔮 Forecast for category".cyan().bold(),
        forecast.category_id
    );
    if let Some(model) = &forecast.model {
        let _ = writeln!(out, "   {} {}", "Model:".dimmed(), model);
    }
    series(&mut out, &forecast.data);
    out
}

pub fn stock(rec: &StockRecommendation) -> String {
    let info = &rec.product_info;
    let plan = &rec.stock_recommendation;
    let stats = &rec.analytics;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} (#{})",
        "📋 Stock plan for".cyan().bold(),
        info.product_name,
        info.product_id
    );
    let _ = writeln!(
        out,
        "   {} {}",
        "Recommended stock:".green(),
        plan.recommended_stock_quantity.to_string().green().bold()
    );
    let _ = writeln!(out, "   {} {}", "7-day demand:".dimmed(), plan.predicted_7day_demand);
    let _ = writeln!(out, "   {} {}", "Safety stock:".dimmed(), plan.safety_stock);
    let _ = writeln!(out, "   {} {:.2}", "Estimated cost:".dimmed(), plan.estimated_cost);
    if let Some(method) = &plan.prediction_method {
        let _ = writeln!(out, "   {} {}", "Method:".dimmed(), method);
    }

    let trend = if rec.is_trending_up() {
        "rising".green()
    } else {
        "flat or falling".yellow()
    };
    let _ = writeln!(
        out,
        "   {} {:.1}/day overall, {:.1}/day last 30 days ({})",
        "Sales:".dimmed(),
        stats.average_daily_sales,
        stats.recent_30day_avg,
        trend
    );
    let _ = writeln!(out, "   {} {:.1} days", "Turnover:".dimmed(), stats.stock_turnover_days);
    out
}

pub fn sales(report: &SalesRangeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} → {}",
        "🧾 Sales".cyan().bold(),
        report.date_range.start,
        report.date_range.end
    );
    let _ = writeln!(out, "   {} {}", "Units sold:".dimmed(), report.total_sales);
    let _ = writeln!(out, "   {} {}", "Orders:".dimmed(), report.total_orders);
    let _ = writeln!(out, "   {} {:.1}", "Daily average:".dimmed(), report.average_daily_sales());
    if let Some(peak) = report.peak_day() {
        let _ = writeln!(out, "   {} {} ({} units)", "Peak day:".dimmed(), peak.date, peak.quantity);
    }

    if !report.top_products_in_range.is_empty() {
        let _ = writeln!(out, "\n   {}", "Top products:".yellow());
        for p in &report.top_products_in_range {
            let _ = writeln!(out, "     {:<30} {:>8}", p.product_name, p.total_sold);
        }
    }
    out
}

pub fn metrics(metrics: &[SystemMetric]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "🧠 Model performance".cyan().bold());
    for m in metrics {
        let icon = match m.status {
            MetricStatus::Good => "✓".green(),
            MetricStatus::Warning => "!".yellow(),
        };
        let _ = writeln!(out, "   {} {:<18} {:<24} {}", icon, m.name, m.value, m.description.dimmed());
    }
    out
}

pub fn dashboard(state: &DashboardState, forecast_view: &ForecastOutcome) -> String {
    let mut out = String::new();
    match &state.stats {
        Some(s) => out.push_str(&stats(s)),
        None => {
            let _ = writeln!(out, "{}", "No statistics loaded yet.".yellow());
        }
    }
    out.push('\n');
    out.push_str(&top_products(&state.top_products));
    out.push('\n');
    out.push_str(&forecast(forecast_view));

    if let Some(at) = state.updated_at {
        let _ = writeln!(
            out,
            "\n   {} {}",
            "Last updated:".dimmed(),
            at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    out
}

pub fn cache_stats(stats: &CacheStats) -> String {
    format!(
        "   {} {} fresh / {} stale entries, {} hits, {} misses",
        "Cache:".dimmed(),
        stats.fresh_entries,
        stats.stale_entries,
        stats.hits,
        stats.misses
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use grocer_core::{DailySales, DateRange};
    use grocer_dashboard::system_metrics;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_stats_rendering() {
        plain();
        let out = stats(&StatsSummary {
            total_sales_quantity: 1200,
            total_orders: 300,
            average_daily_sales: 40.0,
            busiest_day: "2018-02-14".into(),
            busiest_day_sales: 95,
            ml_models_cached: None,
        });

        assert!(out.contains("Orders: 300"));
        assert!(out.contains("2018-02-14 (95 units)"));
        assert!(!out.contains("Cached models"));
    }

    #[test]
    fn test_empty_best_sellers() {
        plain();
        assert!(top_products(&[]).contains("No sales recorded."));
    }

    #[test]
    fn test_fallback_forecast_shows_warning() {
        plain();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let outcome = ForecastOutcome {
            points: ForecastPoint::flat_series(today, 7, 50),
            warning: Some("Forecast did not finish within 45 s".into()),
        };

        let out = forecast(&outcome);
        assert!(out.contains("did not finish"));
        assert!(out.contains("2026-10-20"));
        assert!(out.contains("Total: 350"));
    }

    #[test]
    fn test_sales_rendering() {
        plain();
        let report = SalesRangeReport {
            date_range: DateRange {
                start: "2018-01-01".into(),
                end: "2018-01-03".into(),
            },
            total_sales: 60,
            total_orders: 9,
            daily_sales: vec![
                DailySales { date: "2018-01-01".into(), quantity: 10 },
                DailySales { date: "2018-01-02".into(), quantity: 35 },
                DailySales { date: "2018-01-03".into(), quantity: 15 },
            ],
            top_products_in_range: vec![],
        };

        let out = sales(&report);
        assert!(out.contains("Daily average: 20.0"));
        assert!(out.contains("Peak day: 2018-01-02 (35 units)"));
        assert!(!out.contains("Top products"));
    }

    #[test]
    fn test_metrics_rendering() {
        plain();
        let out = metrics(&system_metrics(&Default::default()));
        assert!(out.contains("Random Forest"));
        assert!(out.lines().nth(1).unwrap().trim_start().starts_with('!'));
    }

    #[test]
    fn test_series_with_huge_values() {
        plain();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut points = ForecastPoint::flat_series(today, 2, u64::MAX);
        points[1].predicted_sales = 1;

        let out = product_forecast(&ProductForecast {
            product_id: 1,
            product_name: "Flour".into(),
            model: None,
            data: points,
        });

        assert!(out.contains(&u64::MAX.to_string()));
        assert!(out.contains(&"█".repeat(30)));
        assert!(out.contains(&format!("Total: {}", u64::MAX)));
    }
}
