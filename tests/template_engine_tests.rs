use std::io::{Cursor, Write};

use chrono::NaiveDate;
use zip::write::FileOptions;
use zip::ZipWriter;

use pptx_templater_server::archive::PptxArchive;
use pptx_templater_server::template::engine::{self, LOGO_PART_PATH};
use pptx_templater_server::template::{self, TemplateError, TemplateParams};

fn build_zip(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    for (path, data) in parts {
        writer.start_file(*path, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn slide_xml(text: &str) -> Vec<u8> {
    format!(
        "<p:sld xmlns:p=\"ns\"><p:txBody><a:t>{}</a:t></p:txBody></p:sld>",
        text
    )
    .into_bytes()
}

fn params(company: &str, date_long: &str) -> TemplateParams {
    TemplateParams {
        company_name: company.to_string(),
        date_long: date_long.to_string(),
        logo: None,
    }
}

#[tokio::test]
async fn test_process_substitutes_every_slide() {
    let template = build_zip(&[
        ("[Content_Types].xml", b"<Types/>"),
        ("ppt/slides/slide1.xml", &slide_xml("Welcome {{COMPANY_NAME}}")),
        (
            "ppt/slides/slide2.xml",
            &slide_xml("{{COMPANY_NAME}} on {{DATE_LONG}}"),
        ),
    ]);

    let output = engine::process(&template, &params("Acme Corp", "21st May, 2025"))
        .await
        .unwrap();

    let archive = PptxArchive::open(&output).unwrap();
    assert_eq!(
        archive.read_text("ppt/slides/slide1.xml").unwrap(),
        String::from_utf8(slide_xml("Welcome Acme Corp")).unwrap()
    );
    assert_eq!(
        archive.read_text("ppt/slides/slide2.xml").unwrap(),
        String::from_utf8(slide_xml("Acme Corp on 21st May, 2025")).unwrap()
    );
}

#[tokio::test]
async fn test_process_strips_logo_token() {
    let template = build_zip(&[(
        "ppt/slides/slide1.xml",
        &slide_xml("before {{LOGO}} after"),
    )]);

    let output = engine::process(&template, &params("Acme", "1st May, 2025"))
        .await
        .unwrap();

    let archive = PptxArchive::open(&output).unwrap();
    let text = archive.read_text("ppt/slides/slide1.xml").unwrap();
    assert!(text.contains("before  after"));
    assert!(!text.contains("{{LOGO}}"));
}

#[tokio::test]
async fn test_non_slide_parts_round_trip_untouched() {
    // Tokens outside slideN.xml parts must survive verbatim.
    let template = build_zip(&[
        ("[Content_Types].xml", b"<Types>{{COMPANY_NAME}}</Types>"),
        ("ppt/slides/_rels/slide1.xml.rels", b"<Relationships/>"),
        ("ppt/slides/slide1.xml", &slide_xml("{{COMPANY_NAME}}")),
        ("ppt/notesSlides/notesSlide1.xml", b"{{DATE_LONG}}"),
    ]);

    let output = engine::process(&template, &params("Acme", "2nd May, 2025"))
        .await
        .unwrap();

    let archive = PptxArchive::open(&output).unwrap();
    assert_eq!(
        archive.read_binary("[Content_Types].xml").unwrap(),
        b"<Types>{{COMPANY_NAME}}</Types>"
    );
    assert_eq!(
        archive.read_binary("ppt/slides/_rels/slide1.xml.rels").unwrap(),
        b"<Relationships/>"
    );
    assert_eq!(
        archive.read_binary("ppt/notesSlides/notesSlide1.xml").unwrap(),
        b"{{DATE_LONG}}"
    );
}

#[tokio::test]
async fn test_process_is_deterministic_over_slide_content() {
    let template = build_zip(&[
        ("ppt/slides/slide1.xml", &slide_xml("{{COMPANY_NAME}}")),
        ("ppt/slides/slide2.xml", &slide_xml("{{DATE_LONG}}")),
    ]);
    let p = params("Acme", "3rd May, 2025");

    let first = engine::process(&template, &p).await.unwrap();
    let second = engine::process(&template, &p).await.unwrap();

    let a = PptxArchive::open(&first).unwrap();
    let b = PptxArchive::open(&second).unwrap();
    for path in ["ppt/slides/slide1.xml", "ppt/slides/slide2.xml"] {
        assert_eq!(a.read_text(path).unwrap(), b.read_text(path).unwrap());
    }
}

#[tokio::test]
async fn test_zero_slide_parts_is_not_an_error() {
    let template = build_zip(&[
        ("[Content_Types].xml", b"<Types/>" as &[u8]),
        ("docProps/app.xml", b"<Properties/>"),
    ]);

    let output = engine::process(&template, &params("Acme", "4th May, 2025"))
        .await
        .unwrap();

    let archive = PptxArchive::open(&output).unwrap();
    assert_eq!(archive.len(), 2);
    assert_eq!(archive.read_binary("[Content_Types].xml").unwrap(), b"<Types/>");
    assert_eq!(archive.read_binary("docProps/app.xml").unwrap(), b"<Properties/>");
}

#[tokio::test]
async fn test_logo_is_stored_byte_identical() {
    let template = build_zip(&[("ppt/slides/slide1.xml", &slide_xml("x"))]);
    let logo = vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x42];
    let mut p = params("Acme", "5th May, 2025");
    p.logo = Some(logo.clone());

    let output = engine::process(&template, &p).await.unwrap();

    let archive = PptxArchive::open(&output).unwrap();
    assert_eq!(archive.read_binary(LOGO_PART_PATH).unwrap(), logo.as_slice());
}

#[tokio::test]
async fn test_logo_overwrites_existing_media_part() {
    let template = build_zip(&[
        ("ppt/slides/slide1.xml", &slide_xml("x")),
        ("ppt/media/logo.png", b"stale logo"),
    ]);
    let mut p = params("Acme", "6th May, 2025");
    p.logo = Some(b"fresh logo".to_vec());

    let output = engine::process(&template, &p).await.unwrap();

    let archive = PptxArchive::open(&output).unwrap();
    assert_eq!(archive.read_binary(LOGO_PART_PATH).unwrap(), b"fresh logo");
    // Overwrite, not duplicate.
    assert_eq!(
        archive
            .part_names()
            .filter(|p| *p == LOGO_PART_PATH)
            .count(),
        1
    );
}

#[tokio::test]
async fn test_no_logo_means_no_media_part() {
    let template = build_zip(&[("ppt/slides/slide1.xml", &slide_xml("x"))]);

    let output = engine::process(&template, &params("Acme", "7th May, 2025"))
        .await
        .unwrap();

    let archive = PptxArchive::open(&output).unwrap();
    assert!(!archive.contains(LOGO_PART_PATH));
}

#[tokio::test]
async fn test_malformed_template_is_fatal() {
    let result = engine::process(b"not a zip at all", &params("Acme", "8th May, 2025")).await;
    assert!(matches!(result, Err(TemplateError::Archive(_))));
}

#[tokio::test]
async fn test_undecodable_slide_part_is_fatal() {
    let template = build_zip(&[
        ("ppt/slides/slide1.xml", &[0xff, 0xfe, 0x00, 0x01]),
        ("ppt/slides/slide2.xml", &slide_xml("{{COMPANY_NAME}}")),
    ]);

    let result = engine::process(&template, &params("Acme", "9th May, 2025")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_generate_builds_filename_and_date() {
    let template = build_zip(&[(
        "ppt/slides/slide1.xml",
        &slide_xml("{{COMPANY_NAME}} {{DATE_LONG}}"),
    )]);
    let date = NaiveDate::from_ymd_opt(2025, 5, 21).unwrap();

    let deck = template::generate(&template, "Acme/Corp", date, None)
        .await
        .unwrap();

    assert_eq!(deck.filename, "20250521 ADA and AcmeCorp Meeting.pptx");
    assert_eq!(deck.date_long, "21st May, 2025");

    let archive = PptxArchive::open(&deck.bytes).unwrap();
    assert_eq!(
        archive.read_text("ppt/slides/slide1.xml").unwrap(),
        String::from_utf8(slide_xml("Acme/Corp 21st May, 2025")).unwrap()
    );
}
