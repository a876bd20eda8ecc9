//! 分数汇总与排序

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 平均分，保留两位小数的字符串；没有分数时为 "0.00"
pub fn format_average(scores: &[f64]) -> String {
    if scores.is_empty() {
        return "0.00".to_string();
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    format!("{:.2}", mean)
}

/// 按分数升序排列，分数相同时保持输入（目录）顺序
pub fn rank_ascending<'a, I>(scores: I) -> Vec<(&'a str, f64)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut ranked: Vec<(&'a str, f64)> = scores.into_iter().collect();
    // sort_by 是稳定排序
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

/// 分数最低的 `n` 个类别，按分数升序
pub fn lowest_categories<'a, I>(scores: I, n: usize) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    rank_ascending(scores)
        .into_iter()
        .take(n)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.0), 3.0);
        assert_eq!(round2(8.1 - 7.33), 0.77);
        assert_eq!(round2(-1.234), -1.23);
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(&[8.0, 4.0]), "6.00");
        assert_eq!(format_average(&[7.0, 8.0, 8.0]), "7.67");
        assert_eq!(format_average(&[]), "0.00");
    }

    #[test]
    fn test_rank_ascending_is_stable() {
        let ranked = rank_ascending(vec![("A", 7.0), ("B", 5.0), ("C", 7.0), ("D", 5.0)]);
        assert_eq!(
            ranked.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec!["B", "D", "A", "C"]
        );
    }

    #[test]
    fn test_lowest_categories() {
        let scores = vec![("Clarity", 8.0), ("Precision", 4.0)];
        assert_eq!(lowest_categories(scores.clone(), 2), vec!["Precision", "Clarity"]);
        assert_eq!(lowest_categories(scores.clone(), 1), vec!["Precision"]);
        assert_eq!(lowest_categories(scores, 5).len(), 2);
    }

    #[test]
    fn test_ties_resolved_by_input_order() {
        let scores = vec![("Clarity", 5.0), ("Precision", 5.0), ("Originality", 9.0)];
        assert_eq!(lowest_categories(scores, 1), vec!["Clarity"]);
    }
}
