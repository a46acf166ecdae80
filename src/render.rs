use analytics::{BatchResult, CorrelationMatrix, CrossAssetAnalytics, SymbolError};
use comfy_table::{Table, presets::UTF8_FULL};

/// Prints a finished batch as terminal tables.
pub fn print_batch(result: &BatchResult) {
    println!("Range {} / interval {}", result.range, result.interval);
    println!("{}", metrics_table(result));

    if let Some(analytics) = &result.analytics {
        println!("\nReturn correlation");
        println!("{}", matrix_table(&analytics.symbols, &analytics.returns_correlation_matrix));
        if let Some(prices) = &analytics.price_correlation_matrix {
            println!("\nPrice correlation");
            println!("{}", matrix_table(&analytics.symbols, prices));
        }
        println!("\nPairs");
        println!("{}", pairs_table(analytics));
    }

    if !result.errors.is_empty() {
        println!();
        print_failures(&result.errors);
    }
}

pub fn print_failures(failures: &[SymbolError]) {
    for failure in failures {
        eprintln!("  {}: {}", failure.symbol, failure.message);
    }
}

fn metrics_table(result: &BatchResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Symbol",
        "Last close",
        "Change %",
        "Ann. return %",
        "Volatility %",
        "Sharpe",
        "Skew",
        "Ex. kurtosis",
        "Returns",
    ]);
    for entry in &result.data {
        let m = &entry.metrics;
        table.add_row(vec![
            entry.symbol.clone(),
            format!("{:.2}", m.last_close),
            format!("{:+.2}", m.price_change_percent),
            format!("{:+.2}", m.mean_return),
            format!("{:.2}", m.historical_volatility),
            format!("{:.2}", m.sharpe_ratio),
            format!("{:.3}", m.skewness),
            format!("{:.3}", m.kurtosis),
            m.sample_size.to_string(),
        ]);
    }
    table
}

fn matrix_table(symbols: &[String], matrix: &CorrelationMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![String::new()];
    header.extend(symbols.iter().cloned());
    table.load_preset(UTF8_FULL).set_header(header);
    for (symbol, row) in symbols.iter().zip(matrix) {
        let mut cells = vec![symbol.clone()];
        cells.extend(row.iter().map(|v| format!("{:.3}", v)));
        table.add_row(cells);
    }
    table
}

fn pairs_table(analytics: &CrossAssetAnalytics) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Pair", "Beta", "Alpha", "R²", "Correlation", "Latest rolling", "Sample",
    ]);
    for rolling in &analytics.rolling_correlations {
        let latest = rolling
            .series
            .last()
            .map(|p| format!("{:.3} ({})", p.value, p.date))
            .unwrap_or_else(|| "-".to_string());
        let fit = analytics
            .regression_analytics
            .iter()
            .find(|r| r.pair == rolling.pair);
        let pair = format!("{} / {}", rolling.pair[0], rolling.pair[1]);
        let row = match fit {
            Some(fit) => vec![
                pair,
                format!("{:.3}", fit.beta),
                format!("{:.5}", fit.alpha),
                format!("{:.3}", fit.r_squared),
                format!("{:.3}", fit.correlation),
                latest,
                fit.sample_size.to_string(),
            ],
            None => vec![
                pair,
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                "-".to_string(),
                latest,
                "too few".to_string(),
            ],
        };
        table.add_row(row);
    }
    table
}
