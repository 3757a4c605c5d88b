// End-to-end pipeline tests: raster → vector features → fine H3 records →
// coarse aggregated table.
//
// All fixtures are anchored on a known coarse cell so the aggregator's
// centroid re-clip is deterministic: the region is a box around that cell's
// center, and the raster sits on the res-9 cell containing that center.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use geo::{BoundingRect, Coord, Rect};
use h3o::{LatLng, Resolution};
use ndarray::array;

use hexcast::{
    run_pipeline, Acquisition, PipelineConfig, RasterGrid, Region, Strategy, TimeAgg,
};

const NODATA: f64 = -9999.0;

fn coarse_center() -> LatLng {
    let coarse = LatLng::new(-34.56, -58.50).unwrap().to_cell(Resolution::Five);
    LatLng::from(coarse)
}

fn fine_center() -> LatLng {
    LatLng::from(coarse_center().to_cell(Resolution::Nine))
}

/// Region box around the coarse cell's center, wide enough to contain both
/// that centroid and the raster fixtures.
fn region() -> Region {
    let center = coarse_center();
    Region::from_polygon(
        Rect::new(
            Coord { x: center.lng() - 0.2, y: center.lat() - 0.2 },
            Coord { x: center.lng() + 0.2, y: center.lat() + 0.2 },
        )
        .to_polygon(),
    )
}

/// A 2×2 raster of ~11m cells centered on the fine cell, well inside a single
/// res-9 hexagon.
fn tiny_raster(values: ndarray::Array2<f64>, date: NaiveDate) -> RasterGrid {
    let center = fine_center();
    let cell_size = 0.0001;
    let half = cell_size * values.ncols() as f64 / 2.0;
    RasterGrid::new(
        values,
        Coord { x: center.lng() - half, y: center.lat() - half },
        cell_size,
        4326,
        NODATA,
        Acquisition::Date(date),
    )
}

fn config() -> PipelineConfig {
    PipelineConfig {
        fine_resolution: 9,
        coarse_resolution: 5,
        ..Default::default()
    }
}

#[test]
fn two_by_two_raster_aggregates_to_one_mean_row() {
    let raster = tiny_raster(
        array![[10.0, NODATA], [30.0, 40.0]],
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
    );

    let table = run_pipeline(&[raster], &region(), &config()).unwrap();

    assert_eq!(table.height(), 1);
    assert_eq!(table.get_column_names_str(), &["hex", "value", "count"]);

    let value = table.column("value").unwrap().f64().unwrap().get(0).unwrap();
    assert_relative_eq!(value, 26.666666666666668, max_relative = 1e-9);

    let count = table.column("count").unwrap().u32().unwrap().get(0).unwrap();
    assert_eq!(count, 3);
}

#[test]
fn monthly_buckets_split_rasters_by_acquisition_date() {
    let january = tiny_raster(array![[1.0]], NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());
    let february = tiny_raster(array![[3.0]], NaiveDate::from_ymd_opt(2020, 2, 10).unwrap());

    let config = PipelineConfig {
        time_agg: Some(TimeAgg::Monthly),
        strategy: Strategy::Sum,
        ..config()
    };
    let table = run_pipeline(&[january, february], &region(), &config).unwrap();

    assert_eq!(table.height(), 2);
    assert_eq!(table.get_column_names_str(), &["hex", "date", "value", "count"]);

    let dates = table.column("date").unwrap().str().unwrap();
    assert_eq!(dates.get(0), Some("2020-01"));
    assert_eq!(dates.get(1), Some("2020-02"));
}

#[test]
fn yearly_bucket_collapses_the_same_rasters() {
    let january = tiny_raster(array![[1.0]], NaiveDate::from_ymd_opt(2020, 1, 5).unwrap());
    let february = tiny_raster(array![[3.0]], NaiveDate::from_ymd_opt(2020, 2, 10).unwrap());

    let config = PipelineConfig {
        time_agg: Some(TimeAgg::Yearly),
        strategy: Strategy::Sum,
        ..config()
    };
    let table = run_pipeline(&[january, february], &region(), &config).unwrap();

    assert_eq!(table.height(), 1);
    let value = table.column("value").unwrap().f64().unwrap().get(0).unwrap();
    assert_relative_eq!(value, 4.0, max_relative = 1e-9);
}

#[test]
fn utm_raster_is_reprojected_through_the_pipeline() {
    // Build the raster footprint in UTM zone 21S by projecting a small
    // lon/lat box through the public Region API.
    let center = fine_center();
    let cell_deg = 0.0001;
    let local = Region::from_polygon(
        Rect::new(
            Coord { x: center.lng() - cell_deg, y: center.lat() - cell_deg },
            Coord { x: center.lng() + cell_deg, y: center.lat() + cell_deg },
        )
        .to_polygon(),
    )
    .to_epsg(32721)
    .unwrap();
    let bounds = local.boundary().bounding_rect().unwrap();

    let raster = RasterGrid::new(
        array![[7.0]],
        bounds.min(),
        bounds.width().min(bounds.height()),
        32721,
        NODATA,
        Acquisition::Date(NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()),
    );

    let table = run_pipeline(&[raster], &region(), &config()).unwrap();
    assert_eq!(table.height(), 1);
    let value = table.column("value").unwrap().f64().unwrap().get(0).unwrap();
    assert_relative_eq!(value, 7.0, max_relative = 1e-9);
}

#[test]
fn result_table_round_trips_through_csv() {
    let raster = tiny_raster(
        array![[10.0, NODATA], [30.0, 40.0]],
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
    );
    let table = run_pipeline(&[raster], &region(), &config()).unwrap();

    let path = std::env::temp_dir().join("hexcast_result.csv");
    hexcast::write_to_csv(table.clone(), &path).unwrap();
    let restored = hexcast::read_from_csv(&path).unwrap();
    assert_eq!(restored.height(), table.height());
    assert_eq!(restored.get_column_names_str(), table.get_column_names_str());
    std::fs::remove_file(&path).ok();
}
