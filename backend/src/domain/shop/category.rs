//! Hierarchical product categories.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CategoryId, SHOP_NAME_MAX, ShopValidationError, default_true};
use crate::domain::slug::Slug;
use crate::domain::validation;

/// Input payload for [`Category::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CategoryDraft {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Product category, optionally nested under a parent.
///
/// An empty slug is derived from the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    id: CategoryId,
    name: String,
    slug: Slug,
    parent_id: Option<CategoryId>,
    description: Option<String>,
    icon: Option<String>,
    order: Option<u32>,
    is_active: bool,
}

impl Category {
    /// Validate and construct a category.
    pub fn new(draft: CategoryDraft) -> Result<Self, ShopValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
    pub fn parent_id(&self) -> Option<CategoryId> {
        self.parent_id
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
    pub fn order(&self) -> Option<u32> {
        self.order
    }
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// `"{parent} > {name}"` when `parent` is given, else the bare name.
    pub fn display_name(&self, parent: Option<&Category>) -> String {
        match parent {
            Some(parent) => format!("{} > {}", parent.name, self.name),
            None => self.name.clone(),
        }
    }

    /// Convert back into an editable draft.
    pub fn into_draft(self) -> CategoryDraft {
        CategoryDraft {
            id: *self.id.as_uuid(),
            name: self.name,
            slug: Some(self.slug.into()),
            parent_id: self.parent_id.map(|id| *id.as_uuid()),
            description: self.description,
            icon: self.icon,
            order: self.order,
            is_active: self.is_active,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<CategoryDraft> for Category {
    type Error = ShopValidationError;

    fn try_from(draft: CategoryDraft) -> Result<Self, Self::Error> {
        let id = CategoryId::from_uuid(draft.id);
        let parent_id = draft.parent_id.map(CategoryId::from_uuid);
        if parent_id == Some(id) {
            return Err(ShopValidationError::SelfParent { id });
        }
        let name = validation::bounded_name(draft.name, "category.name", SHOP_NAME_MAX)?;
        let slug = validation::slug(draft.slug, &name, "category.slug", SHOP_NAME_MAX)?;
        if let Some(icon) = draft.icon.as_deref() {
            validation::max_chars(icon, "category.icon", SHOP_NAME_MAX)?;
        }

        Ok(Self {
            id,
            name,
            slug,
            parent_id,
            description: draft.description,
            icon: draft.icon,
            order: draft.order,
            is_active: draft.is_active,
        })
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CategoryDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// In-memory view of the category hierarchy.
///
/// Sibling order follows the order categories were supplied in.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    categories: Vec<Category>,
    index: HashMap<CategoryId, usize>,
    children: HashMap<CategoryId, Vec<usize>>,
}

impl CategoryTree {
    /// Index `categories` by id and by parent.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut index = HashMap::with_capacity(categories.len());
        let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        for (position, category) in categories.iter().enumerate() {
            index.insert(category.id, position);
            if let Some(parent) = category.parent_id {
                children.entry(parent).or_default().push(position);
            }
        }
        Self {
            categories,
            index,
            children,
        }
    }

    /// Look up a category by id.
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.index
            .get(&id)
            .and_then(|position| self.categories.get(*position))
    }

    /// Categories without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(|category| category.parent_id.is_none())
    }

    /// Direct children of `id`.
    pub fn children_of(&self, id: CategoryId) -> Vec<&Category> {
        self.children
            .get(&id)
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|position| self.categories.get(*position))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every descendant of `id`.
    ///
    /// Direct children come first, followed by each child's own
    /// descendants in turn. A category reachable twice (a cycle in stored
    /// data) is listed once.
    ///
    /// # Examples
    /// ```
    /// use salon_backend::domain::{Category, CategoryDraft, CategoryTree};
    /// use uuid::Uuid;
    ///
    /// let category = |name: &str, parent: Option<Uuid>| {
    ///     Category::new(CategoryDraft {
    ///         id: Uuid::new_v4(),
    ///         name: name.to_owned(),
    ///         slug: None,
    ///         parent_id: parent,
    ///         description: None,
    ///         icon: None,
    ///         order: None,
    ///         is_active: true,
    ///     })
    ///     .expect("valid category")
    /// };
    /// let hair = category("Hair", None);
    /// let care = category("Care", Some(*hair.id().as_uuid()));
    /// let masks = category("Masks", Some(*care.id().as_uuid()));
    /// let root = hair.id();
    /// let tree = CategoryTree::new(vec![hair, care, masks]);
    ///
    /// let names: Vec<_> = tree.all_children(root).iter().map(|c| c.name()).collect();
    /// assert_eq!(names, ["Care", "Masks"]);
    /// ```
    pub fn all_children(&self, id: CategoryId) -> Vec<&Category> {
        let mut seen = HashSet::from([id]);
        self.collect_descendants(id, &mut seen)
    }

    fn collect_descendants<'a>(
        &'a self,
        id: CategoryId,
        seen: &mut HashSet<CategoryId>,
    ) -> Vec<&'a Category> {
        let direct: Vec<&Category> = self
            .children_of(id)
            .into_iter()
            .filter(|child| seen.insert(child.id))
            .collect();
        let mut all = direct.clone();
        for child in direct {
            all.extend(self.collect_descendants(child.id, seen));
        }
        all
    }

    /// Whether `ancestor` is `id` itself or lies on `id`'s parent chain.
    ///
    /// Stops at the first repeated category, so stored cycles terminate.
    pub fn descends_from(&self, id: CategoryId, ancestor: CategoryId) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            if !seen.insert(node) {
                return false;
            }
            current = self.get(node).and_then(Category::parent_id);
        }
        false
    }

    /// `"{parent} > {name}"` for `id`, resolving the parent in the tree.
    pub fn label(&self, id: CategoryId) -> Option<String> {
        let category = self.get(id)?;
        let parent = category.parent_id.and_then(|parent| self.get(parent));
        Some(category.display_name(parent))
    }

    /// All categories in the tree.
    pub fn categories(&self) -> &[Category] {
        self.categories.as_slice()
    }
}
