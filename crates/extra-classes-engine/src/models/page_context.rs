use serde::{Deserialize, Serialize};

use super::menu_item::{ObjectId, id_type};

id_type!(
    /// Identifier of a taxonomy term
    TermId
);

/// A taxonomy term as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub slug: String,
    pub taxonomy: String,
}

impl Term {
    pub fn new(id: u64, slug: impl Into<String>, taxonomy: impl Into<String>) -> Self {
        Self {
            id: TermId(id),
            slug: slug.into(),
            taxonomy: taxonomy.into(),
        }
    }
}

/// Snapshot of what is being viewed during one menu render.
///
/// `active_taxonomy` and `active_term` are only set on taxonomy archive
/// views, i.e. when the queried object is itself a term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContext {
    pub current_object_id: Option<ObjectId>,
    pub is_single_content_view: bool,
    pub is_attachment_view: bool,
    pub parent_object_id: Option<ObjectId>,
    pub is_post_type_archive: bool,
    pub active_post_type: Option<String>,
    pub active_taxonomy: Option<String>,
    pub active_term: Option<Term>,
    pub is_404: bool,
}

impl PageContext {
    /// Single view of a content object of the given type.
    pub fn single(object_id: u64, post_type: impl Into<String>) -> Self {
        Self {
            current_object_id: Some(ObjectId(object_id)),
            is_single_content_view: true,
            active_post_type: Some(post_type.into()),
            ..Self::default()
        }
    }

    /// Attachment view; a `parent_object_id` of `0` means the attachment is unattached.
    pub fn attachment(object_id: u64, parent_object_id: u64) -> Self {
        Self {
            current_object_id: Some(ObjectId(object_id)),
            is_single_content_view: true,
            is_attachment_view: true,
            parent_object_id: ObjectId::non_zero(parent_object_id),
            active_post_type: Some("attachment".to_string()),
            ..Self::default()
        }
    }

    pub fn post_type_archive(post_type: impl Into<String>) -> Self {
        Self {
            is_post_type_archive: true,
            active_post_type: Some(post_type.into()),
            ..Self::default()
        }
    }

    pub fn term_archive(term: Term) -> Self {
        Self {
            active_taxonomy: Some(term.taxonomy.clone()),
            active_term: Some(term),
            ..Self::default()
        }
    }

    pub fn not_found() -> Self {
        Self {
            is_404: true,
            ..Self::default()
        }
    }

    /// The post type that `%%post_type%%` resolves to, if the view has one.
    pub fn resolvable_post_type(&self) -> Option<&str> {
        if self.is_single_content_view || self.is_post_type_archive {
            self.active_post_type.as_deref()
        } else {
            None
        }
    }

    /// Single view or archive of exactly this content type.
    pub fn is_content_type_view(&self, post_type: &str) -> bool {
        self.resolvable_post_type() == Some(post_type)
    }

    /// Archive view of this taxonomy (category and tag archives included).
    pub fn is_taxonomy_view(&self, taxonomy: &str) -> bool {
        self.active_taxonomy.as_deref() == Some(taxonomy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PageContext::single(10, "post"), Some("post"))]
    #[case(PageContext::post_type_archive("product"), Some("product"))]
    #[case(PageContext::term_archive(Term::new(3, "news", "category")), None)]
    #[case(PageContext::not_found(), None)]
    #[case(
        PageContext { active_post_type: Some("post".into()), ..PageContext::default() },
        None
    )]
    fn test_resolvable_post_type(#[case] context: PageContext, #[case] expected: Option<&str>) {
        assert_eq!(context.resolvable_post_type(), expected);
    }

    #[test]
    fn test_unattached_attachment_has_no_parent() {
        let context = PageContext::attachment(50, 0);
        assert!(context.is_attachment_view);
        assert_eq!(context.parent_object_id, None);
    }

    #[test]
    fn test_view_matching() {
        let context = PageContext::single(10, "product");
        assert!(context.is_content_type_view("product"));
        assert!(!context.is_content_type_view("post"));
        assert!(!context.is_taxonomy_view("category"));

        let context = PageContext::term_archive(Term::new(3, "news", "category"));
        assert!(context.is_taxonomy_view("category"));
        assert!(!context.is_taxonomy_view("post_tag"));
    }
}
