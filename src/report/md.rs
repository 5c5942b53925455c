use crate::report::ScoreDocument;
use crate::sources::identity::IdentityMatch;
use crate::types::scoring::{ActivityReport, ComprehensiveScore, CreditScore, ScoreBreakdown};

pub fn to_markdown(document: ScoreDocument<'_>) -> String {
    match document {
        ScoreDocument::Wallet(score) => credit_score_markdown(score),
        ScoreDocument::Activity(report) => activity_markdown(report),
        ScoreDocument::Comprehensive(score) => comprehensive_markdown(score),
        ScoreDocument::Identity(matched) => identity_markdown(matched),
    }
}

fn credit_score_markdown(score: &CreditScore) -> String {
    let mut output = String::new();
    output.push_str("# Credit Score Report\n\n");
    output.push_str(&format!(
        "Score: {} ({})\n",
        score.total,
        score.scale.label()
    ));
    if let Some(confidence) = score.confidence {
        output.push_str(&format!("Confidence: {confidence:.2}\n"));
    }
    output.push_str(&format!("Computed at: {}\n\n", score.computed_at.to_rfc3339()));
    push_breakdown(&mut output, &score.breakdown);
    output
}

fn activity_markdown(report: &ActivityReport) -> String {
    let mut output = credit_score_markdown(&report.score);
    output.push_str(&format!(
        "\n## Rating\n\n{}: {}\n\n",
        report.rating.label(),
        report.rating.description()
    ));

    output.push_str("## Recommendations\n\n");
    if report.recommendations.is_empty() {
        output.push_str("- none\n");
    } else {
        for recommendation in &report.recommendations {
            output.push_str(&format!("- {recommendation}\n"));
        }
    }
    output
}

fn comprehensive_markdown(score: &ComprehensiveScore) -> String {
    let mut output = String::new();
    output.push_str("# Comprehensive Score Report\n\n");
    output.push_str(&format!("Score: {} (300-850)\n", score.score));
    output.push_str(&format!("Confidence: {:.2}\n", score.confidence));
    if let Some(address) = &score.wallet_address {
        output.push_str(&format!("Wallet: {address}\n"));
    }
    if let Some(handle) = &score.social_handle {
        output.push_str(&format!("Social handle: {handle}\n"));
    }
    output.push_str(&format!("Computed at: {}\n\n", score.computed_at.to_rfc3339()));

    output.push_str("## Components\n\n");
    output.push_str(&format!(
        "- blockchain: {:.2}\n- social: {:.2}\n- identity: {:.2}\n- risk: {:.2}\n",
        score.breakdown.blockchain,
        score.breakdown.social,
        score.breakdown.identity,
        score.breakdown.risk
    ));
    output
}

fn identity_markdown(matched: &IdentityMatch) -> String {
    let mut output = String::new();
    output.push_str("# Identity Match Report\n\n");
    if let Some(address) = &matched.wallet_address {
        output.push_str(&format!("Wallet: {address}\n"));
    }
    if let Some(handle) = &matched.social_handle {
        output.push_str(&format!("Social handle: {handle}\n"));
    }
    output.push_str(&format!("Confidence: {:.2}\n", matched.confidence));
    output.push_str(&format!("Status: {}\n", matched.status.label()));
    output.push_str(&format!("Matched at: {}\n\n", matched.matched_at.to_rfc3339()));

    output.push_str("## Conflicts\n\n");
    if matched.conflicts.is_empty() {
        output.push_str("- none\n");
    }
    for link in &matched.conflicts {
        output.push_str(&format!(
            "- {} linked to {}\n",
            link.wallet_address, link.social_handle
        ));
    }
    output
}

fn push_breakdown(output: &mut String, breakdown: &ScoreBreakdown) {
    output.push_str("## Factors\n\n");
    if breakdown.factors.is_empty() {
        output.push_str("- none\n");
        return;
    }
    output.push_str("| Factor | Score | Weight | Detail |\n");
    output.push_str("|---|---|---|---|\n");
    for factor in &breakdown.factors {
        output.push_str(&format!(
            "| {} | {:.2} | {:.2} | {} |\n",
            factor.name, factor.score, factor.weight, factor.description
        ));
    }
}
