use std::f64::consts::PI;

use geo_types::{Coord, Rect};
use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

const TILE_SIZE: f64 = 512.0;
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(center: Coordinates, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub fn fit(bounds: &BoundingBox, options: &FitOptions) -> Self {
        let west = mercator_x(bounds.south_west.longitude);
        let east = mercator_x(bounds.north_east.longitude);
        let north = mercator_y(bounds.north_east.latitude);
        let south = mercator_y(bounds.south_west.latitude);

        let available_width = (options.width - 2.0 * options.padding).max(1.0);
        let available_height = (options.height - 2.0 * options.padding).max(1.0);

        let zoom_x = zoom_for_span(east - west, available_width);
        let zoom_y = zoom_for_span(south - north, available_height);

        let center = Coordinates {
            latitude: mercator_latitude((north + south) / 2.0),
            longitude: (west + east) / 2.0 * 360.0 - 180.0,
        };

        Self::new(center, zoom_x.min(zoom_y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            padding: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl BoundingBox {
    pub fn covering<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut coordinates = coordinates.into_iter();
        let first: Coord<f64> = coordinates.next()?.into();

        let rect = coordinates.fold(Rect::new(first, first), |rect, next| {
            let next: Coord<f64> = next.into();
            let min = rect.min();
            let max = rect.max();

            Rect::new(
                Coord {
                    x: min.x.min(next.x),
                    y: min.y.min(next.y),
                },
                Coord {
                    x: max.x.max(next.x),
                    y: max.y.max(next.y),
                },
            )
        });

        Some(Self {
            south_west: rect.min().into(),
            north_east: rect.max().into(),
        })
    }
}

fn zoom_for_span(span: f64, pixels: f64) -> f64 {
    if span <= 0.0 {
        return MAX_ZOOM;
    }

    (pixels / (TILE_SIZE * span)).log2()
}

fn mercator_x(longitude: f64) -> f64 {
    (longitude + 180.0) / 360.0
}

fn mercator_y(latitude: f64) -> f64 {
    let latitude = latitude.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    let sin = latitude.to_radians().sin();

    0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / PI
}

fn mercator_latitude(y: f64) -> f64 {
    (2.0 * (PI * (1.0 - 2.0 * y)).exp().atan() - PI / 2.0).to_degrees()
}

#[cfg(test)]
fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn bounding_box_covers_all_points_test() {
    let points = vec![
        Coordinates::new(34.05, -118.24).unwrap(),
        Coordinates::new(34.10, -118.30).unwrap(),
        Coordinates::new(33.98, -118.20).unwrap(),
    ];

    let bounds = BoundingBox::covering(points.clone()).unwrap();

    assert_eq!(bounds.south_west, Coordinates::new(33.98, -118.30).unwrap());
    assert_eq!(bounds.north_east, Coordinates::new(34.10, -118.20).unwrap());
    assert!(points.iter().all(|p| {
        (bounds.south_west.latitude..=bounds.north_east.latitude).contains(&p.latitude)
            && (bounds.south_west.longitude..=bounds.north_east.longitude).contains(&p.longitude)
    }));

    assert!(BoundingBox::covering(vec![]).is_none());
}

#[test]
fn fit_single_point_test() {
    let point = Coordinates::new(34.05, -118.24).unwrap();
    let bounds = BoundingBox::covering(vec![point]).unwrap();

    let viewport = Viewport::fit(&bounds, &FitOptions::default());

    assert_eq!(viewport.zoom, MAX_ZOOM);
    assert!(approx(viewport.center.latitude, point.latitude));
    assert!(approx(viewport.center.longitude, point.longitude));
}

#[test]
fn fit_keeps_padding_test() {
    let options = FitOptions::default();
    let bounds = BoundingBox {
        south_west: Coordinates::new(-10.0, -20.0).unwrap(),
        north_east: Coordinates::new(10.0, 20.0).unwrap(),
    };

    let viewport = Viewport::fit(&bounds, &options);

    assert!(approx(viewport.center.latitude, 0.0));
    assert!(approx(viewport.center.longitude, 0.0));

    // the wider axis is the binding one and fills the padded surface exactly
    let world = TILE_SIZE * viewport.zoom.exp2();
    let width = (mercator_x(20.0) - mercator_x(-20.0)) * world;
    let height = (mercator_y(-10.0) - mercator_y(10.0)) * world;

    assert!(approx(width, options.width - 2.0 * options.padding));
    assert!(height <= options.height - 2.0 * options.padding);
}

#[test]
fn fit_larger_box_zooms_out_test() {
    let options = FitOptions::default();
    let small = BoundingBox {
        south_west: Coordinates::new(34.0, -118.3).unwrap(),
        north_east: Coordinates::new(34.1, -118.2).unwrap(),
    };
    let large = BoundingBox {
        south_west: Coordinates::new(33.0, -119.0).unwrap(),
        north_east: Coordinates::new(35.0, -117.0).unwrap(),
    };

    assert!(Viewport::fit(&large, &options).zoom < Viewport::fit(&small, &options).zoom);
}

#[test]
fn mercator_inverse_test() {
    for latitude in [-60.0, -12.5, 0.0, 34.05, 80.0] {
        assert!(approx(mercator_latitude(mercator_y(latitude)), latitude));
    }
}
