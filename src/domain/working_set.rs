use crate::domain::{
    card::{Card, CardId},
    column::{BoardLayout, Column, ColumnId},
};
use std::collections::BTreeSet;

/// What a drag target id resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The dragged card itself
    Active,
    /// Another card, and the column it currently sits in
    Card { id: CardId, column: ColumnId },
    /// A column container
    Column(ColumnId),
}

/// Session-local, mutable copy of the card collection.
///
/// Position within a column is the relative array order of the cards that
/// share that column. Moves never add or drop cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    cards: Vec<Card>,
}

impl WorkingSet {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Gets a card by id
    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id.as_str() == id)
    }

    /// The set of card ids, independent of order
    pub fn ids(&self) -> BTreeSet<CardId> {
        self.cards.iter().map(|card| card.id.clone()).collect()
    }

    /// Cards of one column in display order
    pub fn column_cards<'a>(&'a self, column: &'a ColumnId) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.iter().filter(move |card| &card.column == column)
    }

    /// Per-column view in layout order
    pub fn grouped<'a>(&'a self, layout: &'a BoardLayout) -> Vec<(&'a Column, Vec<&'a Card>)> {
        layout
            .columns
            .iter()
            .map(|col| (col, self.column_cards(&col.id).collect()))
            .collect()
    }

    /// Cards whose column is not part of the layout.
    ///
    /// These are left alone; rendering them is the caller's problem.
    pub fn orphans<'a>(&'a self, layout: &BoardLayout) -> Vec<&'a Card> {
        self.cards
            .iter()
            .filter(|card| !layout.contains(card.column.as_str()))
            .collect()
    }

    /// Resolves a pointer/focus target id for the dragged card.
    ///
    /// Cards take precedence over columns. Returns `None` when the id
    /// matches neither.
    pub fn resolve_target(
        &self,
        active: &CardId,
        target: &str,
        layout: &BoardLayout,
    ) -> Option<DropTarget> {
        if target == active.as_str() {
            return Some(DropTarget::Active);
        }

        if let Some(card) = self.get(target) {
            return Some(DropTarget::Card {
                id: card.id.clone(),
                column: card.column.clone(),
            });
        }

        layout
            .columns
            .iter()
            .find(|col| col.id.as_str() == target)
            .map(|col| DropTarget::Column(col.id.clone()))
    }

    /// Repositions the dragged card relative to a resolved target.
    ///
    /// - Card in the same column: array move to the target's index.
    /// - Card in another column: inserted right before the target.
    /// - Column: only the card's column changes, its array slot stays.
    ///
    /// Returns whether the working set changed.
    pub fn move_card(&mut self, active: &CardId, target: &DropTarget) -> bool {
        let Some(from) = self.position(active.as_str()) else {
            return false;
        };

        match target {
            DropTarget::Active => false,
            DropTarget::Card { id, .. } => {
                let Some(to) = self.position(id.as_str()) else {
                    return false;
                };
                if from == to {
                    return false;
                }

                let target_column = self.cards[to].column.clone();
                let mut card = self.cards.remove(from);

                if card.column == target_column {
                    self.cards.insert(to, card);
                } else {
                    card.column = target_column;
                    let before = self
                        .position(id.as_str())
                        .unwrap_or(self.cards.len());
                    self.cards.insert(before, card);
                }
                true
            }
            DropTarget::Column(column) => {
                if &self.cards[from].column == column {
                    return false;
                }

                self.cards[from].column = column.clone();
                true
            }
        }
    }
}

impl From<Vec<Card>> for WorkingSet {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}
