//! Console report for a pipeline run.

use colored::Colorize;
use indexmap::IndexMap;
use tidypost::{Engagement, RunReport};

pub fn print(report: &RunReport, verbose: bool) {
    print_overview(report);

    println!();
    println!("{}", "Missing Values Before Handling:".yellow().bold());
    print_counts(&report.cleaning.missing_before);
    println!();
    println!("{}", "Missing Values After Handling:".yellow().bold());
    print_counts(&report.cleaning.missing_after);

    println!();
    println!(
        "Number of Duplicates Before Removal: {}",
        report.cleaning.duplicates_before.to_string().white().bold()
    );
    println!(
        "Number of Duplicates After Removal: {}",
        report.cleaning.duplicates_after.to_string().white().bold()
    );

    if report.cleaning.invalid_dates > 0 {
        println!(
            "{} {} date(s) could not be parsed and were marked invalid",
            "Warning:".yellow().bold(),
            report.cleaning.invalid_dates
        );
    }

    if verbose {
        println!();
        println!("{}", "Cleaning stages:".yellow().bold());
        for stage in &report.cleaning.stages {
            println!("  {:20} {}", stage.stage.label(), stage.description);
            for audit in stage.row_audits.iter().take(5) {
                println!(
                    "    row {:>5} {:10} '{}' → '{}'",
                    audit.row,
                    audit.column,
                    audit.original_value.escape_debug(),
                    audit.new_value
                );
            }
        }
    }

    println!();
    println!(
        "{} {}",
        "Cleaned dataset saved to".green().bold(),
        report.output.display().to_string().white()
    );

    println!();
    println!("{}", "Top Users:".yellow().bold());
    if report.analysis.top_users.is_empty() {
        println!("  (no users)");
    }
    for user in &report.analysis.top_users {
        println!("  {:20} {}", user.username, user.posts);
    }

    println!();
    println!("{}", format_engagement(&report.analysis.engagement));

    println!();
    println!(
        "Number of Unique Hashtags: {}",
        report.analysis.unique_hashtags.to_string().white().bold()
    );
}

fn print_overview(report: &RunReport) {
    let overview = &report.overview;
    println!("{}", "Initial Data Exploration:".cyan().bold());
    println!(
        "  {} ({} rows, {} columns)",
        report.source.file.white(),
        overview.rows,
        overview.columns.len()
    );
    for column in &overview.columns {
        println!(
            "  {:20} {:>8} non-null  {:?}",
            column.name, column.non_null, column.kind
        );
    }

    if !overview.head.is_empty() {
        println!();
        let headers: Vec<&str> = overview.columns.iter().map(|c| c.name.as_str()).collect();
        println!("  {}", headers.join(" | ").dimmed());
        for row in &overview.head {
            println!("  {}", row.join(" | "));
        }
    }
}

fn print_counts(counts: &IndexMap<String, usize>) {
    for (column, count) in counts {
        println!("  {:20} {}", column, count);
    }
}

fn format_engagement(engagement: &Engagement) -> String {
    format!(
        "Average Likes: {:.2}, Average Retweets: {:.2}",
        engagement.average_likes, engagement.average_retweets
    )
}
