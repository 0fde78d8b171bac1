use crate::binders::figure::{Figure, Series};
use crate::error::Result;
use crate::state::DataStore;
use crate::types::{PlayerChoice, RenderStyle};

/// One series per requested player, in request order.
///
/// x is the player's `round` values as stored (ascending), y the `metric` values of
/// the same rows. Every series is named after the player's summary row, so an id
/// with history but no summary entry fails with `UnknownPlayer`.
pub fn history_series(
    store: &DataStore,
    players: &PlayerChoice,
    metric: &str,
    style: RenderStyle,
) -> Result<Vec<Series>> {
    let history = store.history();
    let frame = history.frame();
    let metric_col = frame.metric_index(metric)?;
    let round_col = history.round_col();

    players
        .ids()
        .iter()
        .map(|&id| {
            let player = store.summary().player(id)?;
            let mut series = Series::scatter(player.full_name(), style);
            for &row in history.rows_for(id) {
                series.x.push(frame.cell(row, round_col).clone());
                series.y.push(frame.cell(row, metric_col).clone());
            }
            Ok(series)
        })
        .collect()
}

/// History chart: rounds on x, the chosen metric on y.
pub fn history_figure(
    store: &DataStore,
    players: &PlayerChoice,
    metric: &str,
    style: RenderStyle,
) -> Result<Figure> {
    let data = history_series(store, players, metric, style)?;
    Ok(Figure::new(data, "Round", metric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_support::sample_store;
    use crate::types::Cell;

    #[test]
    fn single_player_series_follows_rounds() {
        let series =
            history_series(&sample_store(), &PlayerChoice::One(1), "goals_conceded", RenderStyle::Lines)
                .unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Joe Bloggs");
        assert_eq!(series[0].mode, RenderStyle::Lines);
        assert_eq!(series[0].x, [Cell::Int(1), Cell::Int(2)]);
        assert_eq!(series[0].y, [Cell::Int(0), Cell::Int(1)]);
        assert!(series[0].text.is_none());
    }

    #[test]
    fn many_players_keep_request_order_and_style() {
        let players = PlayerChoice::Many(vec![2, 1]);
        let series =
            history_series(&sample_store(), &players, "goals_conceded", RenderStyle::Markers).unwrap();
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Jane Doe", "Joe Bloggs"]);
        assert!(series.iter().all(|s| s.mode == RenderStyle::Markers));
        assert!(series.iter().all(|s| s.x.len() == s.y.len()));
    }

    #[test]
    fn scalar_and_single_element_list_agree() {
        let store = sample_store();
        let one = history_series(&store, &PlayerChoice::One(2), "round", RenderStyle::Lines).unwrap();
        let many =
            history_series(&store, &PlayerChoice::Many(vec![2]), "round", RenderStyle::Lines).unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn history_without_summary_row_is_unknown_player() {
        let err = history_series(
            &sample_store(),
            &PlayerChoice::One(99),
            "goals_conceded",
            RenderStyle::Lines,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownPlayer(99)));
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let err = history_series(&sample_store(), &PlayerChoice::One(1), "xg", RenderStyle::Lines)
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownMetric { ref metric, .. } if metric == "xg"));
    }

    #[test]
    fn empty_request_yields_no_series() {
        let series =
            history_series(&sample_store(), &PlayerChoice::Many(vec![]), "round", RenderStyle::Lines)
                .unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn figure_titles_axes() {
        let figure =
            history_figure(&sample_store(), &PlayerChoice::One(1), "goals_conceded", RenderStyle::Lines)
                .unwrap();
        assert_eq!(figure.layout.xaxis.title, "Round");
        assert_eq!(figure.layout.yaxis.title, "goals_conceded");
        assert_eq!(figure.layout.hovermode, "closest");
    }
}
