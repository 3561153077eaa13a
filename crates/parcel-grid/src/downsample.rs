//! Factor-of-2 downsampling for quick visual inspection of large rasters.

use serde::{Deserialize, Serialize};

use parcel_common::Grid;

/// Method used to reduce each 2x2 block to one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownsampleMethod {
    /// Average of the block, ignoring NaN - good for continuous imagery.
    #[default]
    Mean,
    /// Maximum of the block - preserves bright features.
    Max,
    /// Top-left value - fast, preserves exact values for categorical masks.
    Nearest,
}

/// Downsample a grid by a factor of 2.
///
/// Output dimensions are halved (rounded down for odd inputs); the
/// transform's scale terms double so the result still geolocates. Blocks
/// that are entirely NaN stay NaN.
pub fn downsample_grid(grid: &Grid, method: DownsampleMethod) -> Grid {
    let new_width = grid.width / 2;
    let new_height = grid.height / 2;

    let mut data = vec![f32::NAN; new_width * new_height];

    for out_y in 0..new_height {
        for out_x in 0..new_width {
            let in_x = out_x * 2;
            let in_y = out_y * 2;

            let block = [
                grid.data[in_y * grid.width + in_x],
                grid.data[in_y * grid.width + in_x + 1],
                grid.data[(in_y + 1) * grid.width + in_x],
                grid.data[(in_y + 1) * grid.width + in_x + 1],
            ];

            data[out_y * new_width + out_x] = match method {
                DownsampleMethod::Mean => mean_of_block(block),
                DownsampleMethod::Max => max_of_block(block),
                DownsampleMethod::Nearest => block[0],
            };
        }
    }

    Grid {
        data,
        width: new_width,
        height: new_height,
        transform: grid.transform.scaled(2.0),
        crs: grid.crs,
    }
}

fn mean_of_block(block: [f32; 4]) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0;
    for v in block {
        if !v.is_nan() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        f32::NAN
    } else {
        sum / count as f32
    }
}

fn max_of_block(block: [f32; 4]) -> f32 {
    let mut max = f32::NEG_INFINITY;
    let mut has_valid = false;
    for v in block {
        if !v.is_nan() {
            has_valid = true;
            if v > max {
                max = v;
            }
        }
    }
    if has_valid {
        max
    } else {
        f32::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_common::{Crs, GeoTransform};

    fn grid_4x4() -> Grid {
        Grid::new(
            vec![
                1.0, 2.0, 3.0, 4.0, //
                5.0, 6.0, 7.0, 8.0, //
                9.0, 10.0, 11.0, 12.0, //
                13.0, 14.0, 15.0, 16.0,
            ],
            4,
            4,
            GeoTransform::from_origin(100.0, 200.0, 0.5, 0.5),
            Crs::from_epsg(32633),
        )
        .unwrap()
    }

    #[test]
    fn test_mean_downsample() {
        let out = downsample_grid(&grid_4x4(), DownsampleMethod::Mean);
        assert_eq!(out.width, 2);
        assert_eq!(out.height, 2);
        assert_eq!(out.data, vec![3.5, 5.5, 11.5, 13.5]);
    }

    #[test]
    fn test_max_downsample() {
        let out = downsample_grid(&grid_4x4(), DownsampleMethod::Max);
        assert_eq!(out.data, vec![6.0, 8.0, 14.0, 16.0]);
    }

    #[test]
    fn test_nearest_downsample() {
        let out = downsample_grid(&grid_4x4(), DownsampleMethod::Nearest);
        assert_eq!(out.data, vec![1.0, 3.0, 9.0, 11.0]);
    }

    #[test]
    fn test_transform_scale_doubles() {
        let out = downsample_grid(&grid_4x4(), DownsampleMethod::Mean);
        assert_eq!(out.transform.a, 1.0);
        assert_eq!(out.transform.e, -1.0);
        // Origin is unchanged; geolocation of the grid corner is stable.
        assert_eq!(out.transform.apply(0.0, 0.0), (100.0, 200.0));
    }

    #[test]
    fn test_nan_handling() {
        let mut grid = grid_4x4();
        grid.data[0] = f32::NAN;
        grid.data[1] = f32::NAN;
        grid.data[4] = f32::NAN;

        let mean = downsample_grid(&grid, DownsampleMethod::Mean);
        assert_eq!(mean.data[0], 6.0); // only v11 valid

        grid.data[5] = f32::NAN;
        let all_nan = downsample_grid(&grid, DownsampleMethod::Mean);
        assert!(all_nan.data[0].is_nan());
    }
}
