//! Order-preserving page concatenation

use crate::constants::OUTPUT_PDF_VERSION;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Guard against cyclic `Parent` chains in damaged files
const MAX_TREE_DEPTH: usize = 64;

/// Concatenate the pages of every document, in document order and then page order.
///
/// Each document is renumbered into a disjoint object range before its
/// objects are moved over. Catalogs, page tree nodes and outlines are
/// dropped; every page is re-parented onto a single new page tree with its
/// inherited attributes materialised on the page itself.
pub fn merge_documents(documents: Vec<Document>) -> lopdf::Result<Document> {
    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_id = output.new_object_id();
    let mut next_id = output.max_id + 1;
    let mut kids = Vec::new();

    for mut doc in documents {
        doc.renumber_objects_with(next_id);
        next_id = doc.max_id + 1;

        let mut pages = Vec::new();
        for page_id in doc.get_pages().into_values() {
            pages.push((page_id, resolve_page(&doc, page_id)?));
        }

        for (id, object) in doc.objects {
            match object.type_name() {
                // Object and xref streams still index the old numbering
                Ok(
                    b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline" | b"ObjStm"
                    | b"XRef",
                ) => {}
                _ => {
                    output.objects.insert(id, object);
                }
            }
        }

        for (page_id, mut page) in pages {
            page.set("Parent", Object::Reference(pages_id));
            output.objects.insert(page_id, Object::Dictionary(page));
            kids.push(Object::Reference(page_id));
        }
    }
    output.max_id = next_id - 1;

    let count = kids.len() as i64;
    output.objects.insert(
        pages_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(count)),
        ])),
    );

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    output.trailer.set("Root", Object::Reference(catalog_id));
    output.compress();

    Ok(output)
}

/// Clone a page dictionary with inherited attributes copied down from its ancestors.
fn resolve_page(doc: &Document, page_id: ObjectId) -> lopdf::Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    for _ in 0..MAX_TREE_DEPTH {
        let Some(parent_id) = parent else { break };
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE_KEYS {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key.to_vec(), value.clone());
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}
