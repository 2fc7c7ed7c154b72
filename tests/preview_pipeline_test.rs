//! Preview pipeline against a real store
//!
//! Covers the routing from file name to renderer and the fallbacks: text
//! that turns out to be binary, images that fail to decode or are too
//! large, and types that are never previewed.

use image::{ImageBuffer, ImageFormat, Rgba};
use std::io::{Cursor, Write};

use vfsh::config::Config;
use vfsh::messages::{Msg, Task};
use vfsh::model::Preview;
use vfsh::services::preview::{generate_preview, MAX_IMAGE_BYTES};
use vfsh::services::{run_task, PreviewOptions};
use vfsh::vfs::{OpenOptions, Storage, Vfs};

fn write_file(vfs: &Vfs, path: &str, data: &[u8]) {
    let mut handle = vfs.open_for_write(path, OpenOptions::create_new()).unwrap();
    handle.write_all(data).unwrap();
    handle.close().unwrap();
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_fn(width, height, |x, _| {
        if x % 2 == 0 {
            Rgba([255u8, 0, 0, 255])
        } else {
            Rgba([0u8, 0, 255, 255])
        }
    });
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

fn preview(vfs: &Vfs, path: &str, width: u16, height: u16) -> Preview {
    generate_preview(vfs, path, width, height, PreviewOptions::default()).unwrap()
}

#[test]
fn test_png_renders_as_half_blocks() {
    let vfs = Vfs::in_memory();
    write_file(&vfs, "/dot.png", &png(4, 4));

    match preview(&vfs, "/dot.png", 40, 20) {
        Preview::Image {
            format,
            width,
            height,
            art,
        } => {
            assert_eq!(format, "png");
            assert_eq!((width, height), (4, 4));
            // Two pixel rows per text line, colours carried as escapes
            assert_eq!(art.lines().count(), 2);
            assert!(art.contains("\x1b[38;2;255;0;0m"));
            assert!(art.contains('▀'));
        }
        other => panic!("expected image, got {:?}", other),
    }
}

#[test]
fn test_large_image_is_scaled_to_viewport() {
    let vfs = Vfs::in_memory();
    write_file(&vfs, "/wide.png", &png(200, 50));

    let Preview::Image { width, art, .. } = preview(&vfs, "/wide.png", 20, 10) else {
        panic!("expected image");
    };

    // Header reports the original size; the art fits the pane
    assert_eq!(width, 200);
    let cells = |line: &str| line.chars().filter(|c| matches!(c, '▀' | '▄' | ' ')).count();
    assert!(art.lines().all(|line| cells(line) <= 20));
    assert!(art.lines().count() <= 10);
}

#[test]
fn test_image_header_in_rendered_text() {
    let vfs = Vfs::in_memory();
    write_file(&vfs, "/dot.png", &png(3, 2));

    let rendered = preview(&vfs, "/dot.png", 40, 20).rendered();
    assert!(rendered.starts_with("Image: png format, 3x2 pixels\n\n"));
}

#[test]
fn test_oversized_image_gets_notice() {
    let vfs = Vfs::in_memory();
    let size = MAX_IMAGE_BYTES as usize + 1;
    write_file(&vfs, "/huge.jpg", &vec![0u8; size]);

    match preview(&vfs, "/huge.jpg", 40, 20) {
        Preview::Notice(text) => {
            assert!(text.starts_with("[Image too large to preview: 5.0 MB]"), "{}", text);
            assert!(text.ends_with("Use a dedicated image viewer for files > 5MB"));
        }
        other => panic!("expected notice, got {:?}", other),
    }
}

#[test]
fn test_mislabelled_image_falls_back_to_hex_dump() {
    let vfs = Vfs::in_memory();
    write_file(&vfs, "/photo.jpg", b"definitely not a jpeg");

    let Preview::Binary(text) = preview(&vfs, "/photo.jpg", 40, 20) else {
        panic!("expected hex dump");
    };
    assert!(text.starts_with("Binary file: photo.jpg\nSize: 21 bytes\n"));
}

#[test]
fn test_binary_content_in_text_file() {
    let vfs = Vfs::in_memory();
    write_file(&vfs, "/log.txt", &[0u8, 1, 2, 3, 4, 5, 6, 7]);

    assert_eq!(
        preview(&vfs, "/log.txt", 40, 20),
        Preview::Notice("[Binary file - cannot preview as text]".into())
    );
}

#[test]
fn test_control_threshold_from_config() {
    let vfs = Vfs::in_memory();
    // One control byte in ten
    write_file(&vfs, "/mixed.txt", b"abcd\x07efghi");

    let strict = Config::default().preview_options();
    let relaxed = Config::from_yaml("text_control_threshold: 0.5\n")
        .unwrap()
        .preview_options();

    assert!(matches!(
        generate_preview(&vfs, "/mixed.txt", 40, 20, strict).unwrap(),
        Preview::Notice(_)
    ));
    assert!(matches!(
        generate_preview(&vfs, "/mixed.txt", 40, 20, relaxed).unwrap(),
        Preview::Text(_)
    ));
}

#[test]
fn test_svg_is_not_previewed() {
    let vfs = Vfs::in_memory();
    write_file(&vfs, "/logo.svg", b"<svg></svg>");

    assert_eq!(
        preview(&vfs, "/logo.svg", 40, 20),
        Preview::Notice("[Cannot preview SVG image files]".into())
    );
}

#[test]
fn test_preview_task_reports_missing_file() {
    let vfs = Vfs::in_memory();

    let msg = run_task(
        &vfs,
        Task::GeneratePreview {
            generation: 7,
            path: "/gone.txt".into(),
            width: 40,
            height: 20,
        },
        PreviewOptions::default(),
    );

    match msg {
        Msg::PreviewLoaded { generation, result } => {
            assert_eq!(generation, 7);
            assert!(result.is_err());
        }
        other => panic!("unexpected message {:?}", other),
    }
}

#[test]
fn test_preview_on_ephemeral_mount() {
    let vfs = Vfs::in_memory();
    vfs.create_directory("/scratch").unwrap();
    vfs.mount("/scratch", std::sync::Arc::new(vfsh::vfs::MemoryBackend::new()))
        .unwrap();
    write_file(&vfs, "/scratch/readme.md", b"# hi\n");

    assert_eq!(
        preview(&vfs, "/scratch/readme.md", 40, 20),
        Preview::Text("# hi\n".into())
    );
}
