use super::*;

fn write_png(dir: &std::path::Path, name: &str, w: u32, h: u32, px: [u8; 4]) -> std::path::PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(w, h, image::Rgba(px))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn pcm_frames_and_duration() {
    let pcm = AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: vec![0.0; 96_000],
    };
    assert_eq!(pcm.frames(), 48_000);
    assert_eq!(pcm.duration_secs(), 1.0);

    let mono = AudioPcm {
        sample_rate: 100,
        channels: 1,
        interleaved_f32: vec![0.0; 50],
    };
    assert_eq!(mono.frames(), 50);
    assert_eq!(mono.duration_secs(), 0.5);

    let broken = AudioPcm {
        sample_rate: 0,
        channels: 0,
        interleaved_f32: vec![0.0; 8],
    };
    assert_eq!(broken.frames(), 0);
    assert_eq!(broken.duration_secs(), 0.0);
}

#[test]
fn image_matching_aspect_fills_the_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "red.png", 2, 1, [255, 0, 0, 255]);
    let canvas = Canvas::new(4, 2).unwrap();

    let prepared = load_slide_image(&path, canvas, Rgb8::default()).unwrap();
    assert_eq!(prepared.width, 4);
    assert_eq!(prepared.height, 2);
    assert_eq!(prepared.rgba8.len(), canvas.frame_bytes());
    for px in prepared.rgba8.chunks_exact(4) {
        assert_eq!(px, &[255, 0, 0, 255]);
    }
}

#[test]
fn narrow_image_is_letterboxed_over_the_background() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "sq.png", 1, 1, [0, 255, 0, 255]);
    let canvas = Canvas::new(4, 2).unwrap();
    let bg = Rgb8 { r: 9, g: 9, b: 9 };

    let prepared = load_slide_image(&path, canvas, bg).unwrap();
    // The 1x1 source scales to 2x2, centered; columns 0 and 3 stay background.
    for y in 0..2usize {
        let row = &prepared.rgba8[y * 4 * 4..(y + 1) * 4 * 4];
        assert_eq!(&row[0..4], &[9, 9, 9, 255], "left gutter, row {y}");
        assert_eq!(&row[4..8], &[0, 255, 0, 255]);
        assert_eq!(&row[8..12], &[0, 255, 0, 255]);
        assert_eq!(&row[12..16], &[9, 9, 9, 255], "right gutter, row {y}");
    }
}

#[test]
fn transparent_pixels_composite_to_the_background() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "clear.png", 2, 2, [255, 0, 0, 0]);
    let canvas = Canvas::new(2, 2).unwrap();
    let bg = Rgb8 {
        r: 10,
        g: 20,
        b: 30,
    };

    let prepared = load_slide_image(&path, canvas, bg).unwrap();
    for px in prepared.rgba8.chunks_exact(4) {
        assert_eq!(px, &[10, 20, 30, 255]);
    }
}

#[test]
fn missing_image_file_is_an_error() {
    let canvas = Canvas::new(2, 2).unwrap();
    let err = load_slide_image(
        std::path::Path::new("/nonexistent/slide.png"),
        canvas,
        Rgb8::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("slide.png"), "{err}");
}

#[test]
fn probing_a_missing_file_is_an_audio_error() {
    let err = probe_audio_duration(std::path::Path::new("/nonexistent/clip.wav")).unwrap_err();
    assert!(matches!(err, SlidecastError::AudioMix(_)));
}
