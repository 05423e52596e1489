use chrono::NaiveDate;
use social_charts::charts::{
    BarChart, BoxPlot, Color, LineChart, Primitive, StaticChartRenderer,
};
use social_charts::config::AppConfig;
use social_charts::data::{AgeLikes, DailyLikes, PlatformLikes};

fn age_rows() -> Vec<AgeLikes> {
    [
        ("18-24", 120.0),
        ("25-34", 80.0),
        ("18-24", 200.0),
        ("35-44", 40.0),
        ("25-34", 95.0),
        ("18-24", 150.0),
    ]
    .into_iter()
    .map(|(g, v)| AgeLikes {
        age_group: g.into(),
        likes: v,
    })
    .collect()
}

fn platform_rows() -> Vec<PlatformLikes> {
    [
        ("Instagram", "Image", 250.0),
        ("Instagram", "Video", 310.0),
        ("Instagram", "Link", 90.0),
        ("Twitter", "Image", 120.0),
        ("Twitter", "Video", 140.0),
        ("Twitter", "Link", 60.0),
    ]
    .into_iter()
    .map(|(p, t, v)| PlatformLikes {
        platform: p.into(),
        post_type: t.into(),
        avg_likes: v,
    })
    .collect()
}

fn daily_rows() -> Vec<DailyLikes> {
    [(3, 120.0), (1, 100.0), (2, 140.0), (7, 90.0), (5, 130.0), (4, 110.0), (6, 150.0)]
        .into_iter()
        .map(|(d, v)| DailyLikes {
            date: NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            avg_likes: v,
        })
        .collect()
}

#[test]
fn box_plot_draws_one_box_per_group() {
    let config = AppConfig::default();
    let (scene, summaries) = BoxPlot::build(&age_rows(), &config.box_plot);

    assert_eq!(scene.id, "boxplot");
    assert_eq!((scene.width, scene.height), (720, 420));
    assert_eq!(summaries.len(), 3);
    assert_eq!(scene.rects().count(), 3);

    let medians = scene.lines().filter(|(_, _, stroke)| stroke.width == 2.0).count();
    assert_eq!(medians, 3);

    for rect in scene.rects() {
        let Primitive::Rect { height, fill, .. } = rect else {
            unreachable!()
        };
        assert!(*height >= 1.0);
        assert_eq!(*fill, Some(Color::LIGHT_GRAY));
    }

    let captions: Vec<&str> = scene.texts().map(|t| t.content.as_str()).collect();
    assert!(captions.contains(&"Age Group"));
    assert!(captions.contains(&"Likes"));
    assert!(captions.contains(&"18-24"));
}

#[test]
fn box_plot_whiskers_span_min_to_max() {
    let config = AppConfig::default();
    let rows = vec![
        AgeLikes {
            age_group: "a".into(),
            likes: 0.0,
        },
        AgeLikes {
            age_group: "a".into(),
            likes: 100.0,
        },
    ];
    let (scene, _) = BoxPlot::build(&rows, &config.box_plot);
    let (bottom, top) = config.box_plot.y_range();

    // y domain is [0, 100]; the lowest cap sits on the axis, the highest on top
    let ys: Vec<f64> = scene
        .lines()
        .filter(|(from, to, _)| from.y == to.y && from.x > config.box_plot.margin.left)
        .map(|(from, _, _)| from.y)
        .collect();
    assert!(ys.contains(&bottom));
    assert!(ys.contains(&top));
}

#[test]
fn bar_chart_has_bar_per_row_and_legend() {
    let config = AppConfig::default();
    let palette = config.palette_colors().unwrap();
    let scene = BarChart::build(&platform_rows(), &config.bar_chart, &palette);

    assert_eq!(scene.id, "barplot");
    assert_eq!(scene.width, 760);
    // six bars plus three legend swatches
    assert_eq!(scene.rects().count(), 9);

    let legend_x = 760.0 - 160.0 + 20.0;
    let swatches: Vec<&Primitive> = scene
        .rects()
        .filter(|r| matches!(r, Primitive::Rect { origin, .. } if origin.x == legend_x))
        .collect();
    assert_eq!(swatches.len(), 3);

    let fills: Vec<Option<Color>> = swatches
        .iter()
        .map(|r| match r {
            Primitive::Rect { fill, .. } => *fill,
            _ => None,
        })
        .collect();
    assert_eq!(fills, palette.into_iter().map(Some).collect::<Vec<_>>());
}

#[test]
fn bar_heights_reach_the_baseline() {
    let config = AppConfig::default();
    let palette = config.palette_colors().unwrap();
    let scene = BarChart::build(&platform_rows(), &config.bar_chart, &palette);
    let (bottom, _) = config.bar_chart.y_range();

    for rect in scene.rects() {
        if let Primitive::Rect { origin, height, .. } = rect {
            if origin.x < 600.0 {
                assert!((origin.y + height - bottom).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn line_chart_sorts_dates_and_marks_each_day() {
    let config = AppConfig::default();
    let mut rows = daily_rows();
    let scene = LineChart::build(&mut rows, &config.line_chart);

    assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(scene.circles().count(), 7);
    // two axis domain lines and the data curve
    assert_eq!(scene.paths().count(), 3);

    let labels: Vec<&str> = scene.texts().map(|t| t.content.as_str()).collect();
    assert!(labels.contains(&"3/1"));
    assert!(labels.contains(&"3/7"));
    assert!(labels.contains(&"Date (March 1\u{2013}7, 2024)"));

    let xs: Vec<f64> = scene
        .circles()
        .map(|c| match c {
            Primitive::Circle { center, .. } => center.x,
            _ => f64::NAN,
        })
        .collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn sorting_is_stable_for_equal_dates() {
    let config = AppConfig::default();
    let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    let mut rows = vec![
        DailyLikes {
            date: day,
            avg_likes: 1.0,
        },
        DailyLikes {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            avg_likes: 5.0,
        },
        DailyLikes {
            date: day,
            avg_likes: 2.0,
        },
    ];
    LineChart::build(&mut rows, &config.line_chart);
    let order: Vec<f64> = rows.iter().map(|r| r.avg_likes).collect();
    assert_eq!(order, vec![5.0, 1.0, 2.0]);
}

#[test]
fn nan_values_are_left_out_of_the_scene() {
    let config = AppConfig::default();
    let mut rows = daily_rows();
    rows[0].avg_likes = f64::NAN;
    let scene = LineChart::build(&mut rows, &config.line_chart);

    assert_eq!(scene.circles().count(), 6);
    assert!(scene.skipped >= 1);
}

#[test]
fn rebuilding_gives_identical_scenes() {
    let config = AppConfig::default();
    let rows = age_rows();
    let (first, _) = BoxPlot::build(&rows, &config.box_plot);
    let (second, _) = BoxPlot::build(&rows, &config.box_plot);
    assert_eq!(first, second);

    let mut daily = daily_rows();
    let a = LineChart::build(&mut daily, &config.line_chart);
    let b = LineChart::build(&mut daily, &config.line_chart);
    assert_eq!(a, b);
}

#[test]
fn svg_contains_one_circle_per_point() {
    let config = AppConfig::default();
    let mut rows = daily_rows();
    let scene = LineChart::build(&mut rows, &config.line_chart);
    let svg = StaticChartRenderer::render_svg(&scene).unwrap();

    assert_eq!(svg.matches("<svg").count(), 1);
    assert_eq!(svg.matches("<circle").count(), 7);
}
