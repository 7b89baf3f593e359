//! Plain-text and JSON rendering of the week views for the CLI.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::analysis::{DistributorShare, RankingViewRow, RatingImpact, WeekendDependencyRow};
use crate::normalization::format::{group_thousands, group_thousands_f64, percent};
use crate::pipeline::WeekReport;

const BAR_WIDTH: usize = 40;

/// Pads to `width` terminal columns; wide glyphs count double.
fn pad(s: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(s.width()));
    if right_align {
        format!("{fill}{s}")
    } else {
        format!("{s}{fill}")
    }
}

/// Columns separated by two spaces; `numeric[i]` right-aligns column `i`.
pub fn render_table(headers: &[&str], numeric: &[bool], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }
    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| pad(c, widths[i], numeric.get(i).copied().unwrap_or(false)))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

/// Horizontal bars scaled to the largest value.
pub fn render_bar_chart(series: &[(String, u64)]) -> String {
    let max = series.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let label_width = series.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in series {
        let len = if max == 0 {
            0
        } else {
            ((*value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
        };
        writeln!(
            out,
            "{}  {} {}",
            pad(label, label_width, false),
            "█".repeat(len),
            group_thousands(*value)
        )
        .ok();
    }
    out
}

pub fn render_ranking(rows: &[RankingViewRow], series: &[(String, u64)]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.rank.to_string(),
                r.rank_change.clone(),
                r.title_name.clone(),
                r.open_date.clone(),
                r.weekly_audience.clone(),
                r.cumulative_audience.clone(),
                r.weekly_revenue.clone(),
                r.sales_share.clone(),
                r.cumulative_revenue.clone(),
            ]
        })
        .collect();
    let mut out = String::from("## 주간 박스오피스 순위\n\n");
    out.push_str(&render_table(
        &[
            "순위", "변동", "영화명", "개봉일", "주간 관객수", "누적 관객수", "주간 매출액",
            "매출 점유율", "누적 매출액",
        ],
        &[true, true, false, false, true, true, true, true, true],
        &body,
    ));
    out.push_str("\n## 주간 관객수\n\n");
    out.push_str(&render_bar_chart(series));
    out
}

pub fn render_distributors(shares: &[DistributorShare]) -> String {
    let body: Vec<Vec<String>> = shares
        .iter()
        .map(|s| {
            vec![
                s.distributor.clone(),
                group_thousands(s.weekly_audience),
                percent(s.share_percent),
            ]
        })
        .collect();
    let mut out = String::from("## 배급사별 주간 관객 동원\n\n");
    out.push_str(&render_table(
        &["배급사", "주간 관객수 (명)", "기여 (%)"],
        &[false, true, true],
        &body,
    ));
    out
}

pub fn render_ratings(groups: &[RatingImpact]) -> String {
    let body: Vec<Vec<String>> = groups
        .iter()
        .map(|g| {
            vec![
                g.watch_grade.clone(),
                group_thousands(g.total_audience),
                group_thousands_f64(g.mean_audience),
                g.title_count.to_string(),
            ]
        })
        .collect();
    let mut out = String::from("## 관람 등급별 관객수\n\n");
    out.push_str(&render_table(
        &["관람등급", "총 관객수 (명)", "평균 관객수 (명)", "영화 수"],
        &[false, true, true, true],
        &body,
    ));
    out
}

fn weekend_slice(title: &str, rows: &[WeekendDependencyRow]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.title_name.clone(), percent(r.ratio)])
        .collect();
    let mut out = String::new();
    writeln!(out, "### {title}\n").ok();
    out.push_str(&render_table(&["영화명", "비율 (%)"], &[false, true], &body));
    out
}

pub fn render_weekend(highest: &[WeekendDependencyRow], lowest: &[WeekendDependencyRow]) -> String {
    let mut out = String::from("## 주말 의존도 (주간 ÷ 누적 관객수, 추정 지표)\n\n");
    out.push_str(&weekend_slice("주말 의존도가 높은 영화", highest));
    out.push('\n');
    out.push_str(&weekend_slice("주말 의존도가 낮은 영화", lowest));
    out
}

/// Every view of the week, one section after another.
pub fn render_all(report: &WeekReport) -> String {
    let weekend = report.weekend();
    [
        render_ranking(&report.ranking(), &report.audience_series()),
        render_distributors(&report.distributors()),
        render_ratings(&report.ratings()),
        render_weekend(&weekend.highest, &weekend.lowest),
    ]
    .join("\n")
}

#[derive(Serialize)]
struct AllViews {
    week_end: String,
    ranking: Vec<RankingViewRow>,
    audience_series: Vec<(String, u64)>,
    distributors: Vec<DistributorShare>,
    ratings: Vec<RatingImpact>,
    weekend: crate::analysis::WeekendDependency,
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_all_json(report: &WeekReport) -> Result<String> {
    render_json(&AllViews {
        week_end: report.week_end.format("%Y-%m-%d").to_string(),
        ranking: report.ranking(),
        audience_series: report.audience_series(),
        distributors: report.distributors(),
        ratings: report.ratings(),
        weekend: report.weekend(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testutil::row;
    use chrono::NaiveDate;

    fn report() -> WeekReport {
        let mut rows = vec![
            row(1, "A", 100_000, 400_000, "15세이상관람가", "Dist1"),
            row(2, "B", 50_000, 50_000, "전체관람가", "Dist1"),
        ];
        rows[0].ranking.rank_change = 2;
        rows[0].ranking.sales_share = 66.7;
        rows[1].ranking.is_new_entry = true;
        rows[1].ranking.sales_share = 33.3;
        WeekReport {
            week_end: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            rows,
        }
    }

    #[test]
    fn padding_follows_terminal_width() {
        assert_eq!(pad("abc", 5, false), "abc  ");
        assert_eq!(pad("영화", 6, true), "  영화");
        // Emoji take two columns; combining marks take none.
        assert_eq!(pad("🎬 영화", 8, false), "🎬 영화 ");
        assert_eq!(pad("e\u{301}", 3, true), "  e\u{301}");
    }

    #[test]
    fn wide_and_combining_titles_stay_aligned() {
        let out = render_table(
            &["영화명", "n"],
            &[false, true],
            &[
                vec!["🎬 영화".into(), "1".into()],
                vec!["가".into(), "22".into()],
                vec!["cafe\u{301}".into(), "333".into()],
            ],
        );
        let widths: Vec<usize> = out.lines().map(|l| l.width()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}\n{out}");
    }

    #[test]
    fn table_aligns_columns() {
        let out = render_table(
            &["name", "n"],
            &[false, true],
            &[vec!["a".into(), "1".into()], vec!["bbb".into(), "22".into()]],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "name   n");
        assert_eq!(lines[1], "----  --");
        assert_eq!(lines[2], "a      1");
        assert_eq!(lines[3], "bbb   22");
    }

    #[test]
    fn bar_chart_scales_to_largest() {
        let out = render_bar_chart(&[("a".into(), 100), ("b".into(), 50), ("c".into(), 0)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH / 2);
        assert_eq!(lines[2].matches('█').count(), 0);
        assert!(lines[0].ends_with("100"));
    }

    #[test]
    fn text_report_contains_every_section() {
        let out = render_all(&report());
        assert!(out.contains("100,000 명"));
        assert!(out.contains("150,000"));
        assert!(out.contains("100.00%"));
        assert!(out.contains("25.00%"));
        assert!(out.contains("전체관람가"));
        assert!(out.contains("변동"));
        assert!(out.contains("▲2"));
        assert!(out.contains("NEW"));
        assert!(out.contains("66.70%"));
    }

    #[test]
    fn json_report_has_all_views() {
        let v: serde_json::Value = serde_json::from_str(&render_all_json(&report()).unwrap()).unwrap();
        assert_eq!(v["week_end"], "2024-03-03");
        assert_eq!(v["ranking"].as_array().unwrap().len(), 2);
        assert_eq!(v["ranking"][0]["rank_change"], "▲2");
        assert_eq!(v["ranking"][1]["rank_change"], "NEW");
        assert_eq!(v["ranking"][1]["sales_share"], "33.30%");
        assert_eq!(v["distributors"][0]["weekly_audience"], 150_000);
        assert_eq!(v["weekend"]["highest"][0]["ratio"], 100.0);
        assert_eq!(v["ratings"].as_array().unwrap().len(), 2);
    }
}
