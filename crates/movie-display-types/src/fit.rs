/// Fit a source aspect ratio inside a container without cropping.
///
/// Mirrors the float-ratio arithmetic the painter expects: results are
/// truncated, not rounded, so `fit_dimensions(1000, 1000, 16, 9)` yields a
/// height of 562.
pub fn fit_dimensions(
    container_width: u32,
    container_height: u32,
    source_width: u32,
    source_height: u32,
) -> (u32, u32) {
    let frame_ratio = container_width as f32 / container_height as f32;
    let video_ratio = source_width as f32 / source_height as f32;

    if video_ratio > frame_ratio {
        let width = container_width as f32;
        (container_width, (width / video_ratio) as u32)
    } else if video_ratio < frame_ratio {
        let height = container_height as f32;
        ((height * video_ratio) as u32, container_height)
    } else {
        (container_width, container_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrower_source_is_height_bound() {
        assert_eq!(fit_dimensions(1920, 1080, 4, 3), (1440, 1080));
    }

    #[test]
    fn wider_source_is_width_bound() {
        assert_eq!(fit_dimensions(1000, 1000, 16, 9), (1000, 562));
    }

    #[test]
    fn equal_ratios_fill_the_container() {
        assert_eq!(fit_dimensions(800, 600, 4, 3), (800, 600));
    }

    #[test]
    fn degenerate_source_falls_back_to_container() {
        // 0/0 compares unordered against the frame ratio, so both
        // comparisons fail and the container dimensions win.
        assert_eq!(fit_dimensions(640, 480, 0, 0), (640, 480));
    }
}
