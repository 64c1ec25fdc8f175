use booklet_impose::source::*;
use booklet_impose::*;
use image::{Rgb, RgbImage};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

fn write_image(path: &Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([200, 100, 50]))
        .save(path)
        .unwrap();
}

fn write_epub(path: &Path, chapters: &[(&str, &str)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();

    zip.start_file("mimetype", options).unwrap();
    zip.write_all(b"application/epub+zip").unwrap();

    zip.start_file("META-INF/container.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#,
    )
    .unwrap();

    let mut manifest = String::new();
    let mut spine = String::new();
    for (index, (name, _)) in chapters.iter().enumerate() {
        manifest.push_str(&format!(
            r#"<item id="c{}" href="text/{}" media-type="application/xhtml+xml"/>"#,
            index, name
        ));
        spine.push_str(&format!(r#"<itemref idref="c{}"/>"#, index));
    }
    let opf = format!(
        r#"<?xml version="1.0"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0">
  <manifest>{}</manifest>
  <spine>{}</spine>
</package>"#,
        manifest, spine
    );
    zip.start_file("OEBPS/content.opf", options).unwrap();
    zip.write_all(opf.as_bytes()).unwrap();

    for (name, body) in chapters {
        zip.start_file(format!("OEBPS/text/{}", name), options)
            .unwrap();
        let html = format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><title>t</title></head>
<body>{}</body></html>"#,
            body
        );
        zip.write_all(html.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_collect_images_sorted_and_filtered() {
    let dir = tempdir().unwrap();
    write_image(&dir.path().join("b.png"), 4, 4);
    write_image(&dir.path().join("a.PNG"), 4, 4);
    write_image(&dir.path().join("c.jpg"), 4, 4);
    std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
    std::fs::create_dir(dir.path().join("nested.png")).unwrap();

    let images = collect_images(dir.path()).unwrap();
    let names: Vec<_> = images
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.PNG", "b.png", "c.jpg"]);
}

#[test]
fn test_collect_single_image() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("only.png");
    write_image(&path, 2, 2);
    assert_eq!(collect_images(&path).unwrap(), vec![path]);
}

#[test]
fn test_collect_rejects_empty_directory() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("readme.md"), "no images").unwrap();
    match collect_images(dir.path()) {
        Err(ImposeError::Input(msg)) => assert!(msg.contains("No images")),
        other => panic!("Expected Input error, got {:?}", other.map(|v| v.len())),
    }
}

#[test]
fn test_split_landscape_images() {
    let dir = tempdir().unwrap();
    let wide = dir.path().join("01_wide.png");
    let tall = dir.path().join("02_tall.png");
    write_image(&wide, 9, 4);
    write_image(&tall, 4, 9);

    let paths = collect_images(dir.path()).unwrap();
    let units = expand_units(&paths, true);
    let parts: Vec<_> = units.iter().map(|u| u.part).collect();
    assert_eq!(
        parts,
        vec![ImagePart::LeftHalf, ImagePart::RightHalf, ImagePart::Whole]
    );

    let left = units[0].load().unwrap();
    let right = units[1].load().unwrap();
    assert_eq!((left.width(), right.width()), (5, 4));

    // Without splitting every file stays whole
    assert_eq!(expand_units(&paths, false).len(), 2);
}

#[test]
fn test_oriented_dimensions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("oriented.png");
    write_image(&path, 7, 3);
    assert_eq!(oriented_dimensions(&path).unwrap(), (7, 3));
}

#[test]
fn test_read_text_normalizes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.txt");
    std::fs::write(&path, "\u{feff}line one\r\nline two").unwrap();
    assert_eq!(read_text(&path).unwrap(), "line one\nline two");
}

#[test]
fn test_read_text_rejects_blank_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blank.txt");
    std::fs::write(&path, " \n\n ").unwrap();
    assert!(matches!(read_text(&path), Err(ImposeError::Input(_))));
}

#[test]
fn test_text_input_extension_checked() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.doc");
    std::fs::write(&path, "text").unwrap();
    assert!(matches!(
        read_text_input(&path),
        Err(ImposeError::Input(_))
    ));
}

#[test]
fn test_epub_spine_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.epub");
    write_epub(
        &path,
        &[
            ("one.xhtml", "<h1>第一章</h1><p>甲乙丙。</p>"),
            ("two.xhtml", "<p>Second   chapter</p><p>ends &amp; here</p>"),
        ],
    );

    let text = read_epub(&path).unwrap();
    assert_eq!(text, "第一章\n\n甲乙丙。\n\nSecond chapter\n\nends & here");
    assert_eq!(read_text_input(&path).unwrap(), text);
}

#[test]
fn test_epub_without_container_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.epub");
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    zip.start_file("mimetype", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"application/epub+zip").unwrap();
    zip.finish().unwrap();

    assert!(matches!(read_epub(&path), Err(ImposeError::Epub(_))));
}

#[test]
fn test_compose_grid_of_loaded_images() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cell.png");
    write_image(&path, 6, 8);
    let image = ImageUnit::whole(&path).load().unwrap();

    let cells = [Some(image.clone()), Some(image), None, None];
    let grid = compose_grid(&cells, 2, (100, 100)).unwrap();
    assert_eq!((grid.width(), grid.height()), (14, 18));
}
