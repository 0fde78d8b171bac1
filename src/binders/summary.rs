use crate::binders::figure::{Figure, Series};
use crate::error::Result;
use crate::state::DataStore;
use crate::types::{Position, RenderStyle};

/// Four marker series, GK, DF, MF, FW in that order, each holding its players in
/// table order. A position with no players still gets an empty series.
pub fn summary_series(store: &DataStore, x_metric: &str, y_metric: &str) -> Result<Vec<Series>> {
    let summary = store.summary();
    let frame = summary.frame();
    let x_col = frame.metric_index(x_metric)?;
    let y_col = frame.metric_index(y_metric)?;

    let mut series: Vec<Series> = Position::ALL
        .iter()
        .map(|p| {
            let mut s = Series::scatter(p.label(), RenderStyle::Markers);
            s.text = Some(Vec::new());
            s.customdata = Some(Vec::new());
            s
        })
        .collect();

    for (row, player) in summary.players().iter().enumerate() {
        let Some(position) = player.position else {
            continue;
        };
        let s = &mut series[(position.code() - 1) as usize];
        s.x.push(frame.cell(row, x_col).clone());
        s.y.push(frame.cell(row, y_col).clone());
        s.text.get_or_insert_with(Vec::new).push(player.full_name());
        s.customdata.get_or_insert_with(Vec::new).push(player.id);
    }

    Ok(series)
}

/// Summary scatter chart with the two metrics as axis titles.
pub fn summary_figure(store: &DataStore, x_metric: &str, y_metric: &str) -> Result<Figure> {
    let data = summary_series(store, x_metric, y_metric)?;
    Ok(Figure::new(data, x_metric, y_metric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::state::{DataStore, HistoryTable, SummaryTable};
    use crate::test_support::{history_frame, sample_store, summary_frame, summary_row};
    use crate::types::Cell;

    fn single_player_store() -> DataStore {
        DataStore::new(
            SummaryTable::from_frame(summary_frame(vec![summary_row(
                1, "Joe", "Bloggs", 3, 55, 900, 10,
            )]))
            .unwrap(),
            HistoryTable::from_frame(history_frame(vec![])).unwrap(),
        )
    }

    #[test]
    fn lone_midfielder_lands_in_mf_series() {
        let series = summary_series(&single_player_store(), "minutes", "goals_conceded").unwrap();
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["GK", "DF", "MF", "FW"]);

        let mf = &series[2];
        assert_eq!(mf.x, [Cell::Int(900)]);
        assert_eq!(mf.y, [Cell::Int(10)]);
        assert_eq!(mf.text.as_deref(), Some(&["Joe Bloggs".to_string()][..]));
        assert_eq!(mf.customdata.as_deref(), Some(&[1][..]));
        assert_eq!(mf.mode, RenderStyle::Markers);

        for idx in [0, 1, 3] {
            assert!(series[idx].is_empty(), "{} should be empty", series[idx].name);
        }
    }

    #[test]
    fn empty_table_still_yields_four_series() {
        let store = DataStore::new(
            SummaryTable::from_frame(summary_frame(vec![])).unwrap(),
            HistoryTable::from_frame(history_frame(vec![])).unwrap(),
        );
        let series = summary_series(&store, "minutes", "now_cost").unwrap();
        assert_eq!(series.len(), 4);
        assert!(series.iter().all(Series::is_empty));
    }

    #[test]
    fn rows_keep_table_order_within_position() {
        let store = DataStore::new(
            SummaryTable::from_frame(summary_frame(vec![
                summary_row(5, "B", "Second", 4, 80, 500, 3),
                summary_row(6, "Keeper", "One", 1, 45, 900, 12),
                summary_row(7, "A", "First", 4, 95, 100, 1),
            ]))
            .unwrap(),
            HistoryTable::from_frame(history_frame(vec![])).unwrap(),
        );
        let series = summary_series(&store, "now_cost", "minutes").unwrap();
        assert_eq!(series[3].x, [Cell::Int(80), Cell::Int(95)]);
        assert_eq!(series[3].customdata.as_deref(), Some(&[5, 7][..]));
        assert_eq!(series[0].len(), 1);
    }

    #[test]
    fn players_without_position_are_not_plotted() {
        let store = DataStore::new(
            SummaryTable::from_frame(summary_frame(vec![summary_row(9, "No", "Role", 0, 1, 2, 3)]))
                .unwrap(),
            HistoryTable::from_frame(history_frame(vec![])).unwrap(),
        );
        let series = summary_series(&store, "minutes", "goals_conceded").unwrap();
        assert!(series.iter().all(Series::is_empty));
    }

    #[test]
    fn unknown_axis_metric_is_rejected() {
        let err = summary_series(&sample_store(), "minutes", "xg").unwrap_err();
        assert!(matches!(err, AppError::UnknownMetric { table: "player_summary", .. }));
        let err = summary_series(&sample_store(), "xg", "minutes").unwrap_err();
        assert!(matches!(err, AppError::UnknownMetric { .. }));
    }

    #[test]
    fn figure_uses_metric_names_as_axis_titles() {
        let figure = summary_figure(&sample_store(), "minutes", "goals_conceded").unwrap();
        assert_eq!(figure.data.len(), 4);
        assert_eq!(figure.layout.xaxis.title, "minutes");
        assert_eq!(figure.layout.yaxis.title, "goals_conceded");
    }
}
