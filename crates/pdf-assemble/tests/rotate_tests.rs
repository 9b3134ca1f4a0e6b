use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_assemble::*;
use std::path::{Path, PathBuf};

fn create_test_pdf(rotations: &[Option<i64>]) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &rotate in rotations {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]);
        if let Some(rotate) = rotate {
            page.set("Rotate", Object::Integer(rotate));
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(rotations.len() as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn write_pdf(mut doc: Document, path: &Path) {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

fn rotations(doc: &Document) -> Vec<i64> {
    let ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    ids.iter()
        .map(|&id| {
            doc.get_dictionary(id)
                .unwrap()
                .get(b"Rotate")
                .unwrap()
                .as_i64()
                .unwrap()
        })
        .collect()
}

#[test]
fn test_rotation_is_absolute() {
    let mut doc = create_test_pdf(&[None, Some(270), Some(180)]);
    let pages = rotate_document(&mut doc, Rotation::Clockwise90).unwrap();
    assert_eq!(pages, 3);
    assert_eq!(rotations(&doc), vec![90, 90, 90]);
}

#[test]
fn test_rotation_to_zero_clears_previous_value() {
    let mut doc = create_test_pdf(&[Some(90), Some(270)]);
    rotate_document(&mut doc, Rotation::None).unwrap();
    assert_eq!(rotations(&doc), vec![0, 0]);
}

/// Move `/Rotate` off the pages and onto the Pages node
fn inherit_rotation(doc: &mut Document, degrees: i64) {
    for id in doc.get_pages().into_values().collect::<Vec<ObjectId>>() {
        doc.get_object_mut(id)
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .remove(b"Rotate");
    }
    let pages_id = doc
        .catalog()
        .unwrap()
        .get(b"Pages")
        .unwrap()
        .as_reference()
        .unwrap();
    doc.get_object_mut(pages_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Rotate", Object::Integer(degrees));
}

#[test]
fn test_rotation_overrides_inherited_value() {
    let mut doc = create_test_pdf(&[None, None, None]);
    inherit_rotation(&mut doc, 270);

    rotate_document(&mut doc, Rotation::Clockwise90).unwrap();
    assert_eq!(rotations(&doc), vec![90, 90, 90]);
}

#[tokio::test]
async fn test_rotate_pdfs_overrides_inherited_value() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("inherited.pdf");
    let mut doc = create_test_pdf(&[None, None, None]);
    inherit_rotation(&mut doc, 270);
    write_pdf(doc, &source);

    let options = RotateOptions {
        rotation: Rotation::Clockwise90,
        overwrite: false,
    };
    let written = rotate_pdfs(&[&source], &options).await.unwrap();

    let rotated = Document::load(&written[0]).unwrap();
    assert_eq!(rotations(&rotated), vec![90, 90, 90]);
}

#[test]
fn test_rotated_path() {
    assert_eq!(
        rotated_path("/tmp/docs/report.pdf"),
        PathBuf::from("/tmp/docs/report-rotated.pdf")
    );
    // Only the extension is replaced, not an earlier ".pdf" in the name
    assert_eq!(
        rotated_path("/tmp/a.pdf.d/scan.pdf"),
        PathBuf::from("/tmp/a.pdf.d/scan-rotated.pdf")
    );
}

#[tokio::test]
async fn test_rotate_to_sibling_leaves_original_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("scan.pdf");
    write_pdf(create_test_pdf(&[None, Some(270), Some(180)]), &source);
    let original_bytes = std::fs::read(&source).unwrap();

    let options = RotateOptions {
        rotation: Rotation::Clockwise90,
        overwrite: false,
    };
    let written = rotate_pdfs(&[&source], &options).await.unwrap();

    let expected = dir.path().join("scan-rotated.pdf");
    assert_eq!(written, vec![expected.clone()]);
    assert_eq!(std::fs::read(&source).unwrap(), original_bytes);

    let rotated = Document::load(&expected).unwrap();
    assert_eq!(rotations(&rotated), vec![90, 90, 90]);
}

#[tokio::test]
async fn test_rotate_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("scan.pdf");
    write_pdf(create_test_pdf(&[Some(90), None]), &source);

    let options = RotateOptions {
        rotation: Rotation::Clockwise180,
        overwrite: true,
    };
    let written = rotate_pdfs(&[&source], &options).await.unwrap();
    assert_eq!(written, vec![source.clone()]);
    assert!(!dir.path().join("scan-rotated.pdf").exists());

    let rotated = Document::load(&source).unwrap();
    assert_eq!(rotations(&rotated), vec![180, 180]);
}

#[tokio::test]
async fn test_rotate_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.pdf");
    let broken = dir.path().join("b.pdf");
    let last = dir.path().join("c.pdf");
    write_pdf(create_test_pdf(&[None]), &first);
    std::fs::write(&broken, b"not a pdf at all").unwrap();
    write_pdf(create_test_pdf(&[None]), &last);

    let result = rotate_pdfs(&[&first, &broken, &last], &RotateOptions::default()).await;
    assert!(result.is_err());

    assert!(dir.path().join("a-rotated.pdf").exists());
    assert!(!dir.path().join("c-rotated.pdf").exists());
}

#[test]
fn test_rotation_from_degrees() {
    assert_eq!(Rotation::try_from(0).unwrap(), Rotation::None);
    assert_eq!(Rotation::try_from(90).unwrap(), Rotation::Clockwise90);
    assert_eq!(Rotation::try_from(180).unwrap(), Rotation::Clockwise180);
    assert_eq!(Rotation::try_from(270).unwrap(), Rotation::Clockwise270);
    assert!(matches!(
        Rotation::try_from(45),
        Err(AssembleError::InvalidRotation(45))
    ));
    assert!(Rotation::try_from(360).is_err());
}
