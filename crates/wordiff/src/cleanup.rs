//! Character-level edit scripts and their semantic cleanup.
//!
//! A raw Myers script over characters is minimal but fragmented: it happily
//! matches a lone `e` in the middle of two unrelated words. The passes here
//! trade minimality for legibility. Every pass keeps the script valid: the
//! `Equal` and `Delete` texts still concatenate to the old string, and the
//! `Equal` and `Insert` texts to the new one.
//!
//! Lengths compared against each other are counted in `char`s. Slicing is
//! always done at offsets obtained from matching whole `str`s or `char`s,
//! so it never lands inside a code point.

use std::mem;

use similar::{Algorithm, ChangeTag, TextDiff};

/// One operation of an edit script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    /// Which side(s) the text belongs to.
    pub tag: ChangeTag,
    /// The text of the operation.
    pub text: String,
}

impl Edit {
    /// Create an edit.
    pub fn new(tag: ChangeTag, text: impl Into<String>) -> Self {
        Self {
            tag,
            text: text.into(),
        }
    }

    /// Text present on both sides.
    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(ChangeTag::Equal, text)
    }

    /// Text present only on the old side.
    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(ChangeTag::Delete, text)
    }

    /// Text present only on the new side.
    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(ChangeTag::Insert, text)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Myers diff of `old` and `new` at character granularity, with runs of
/// the same tag grouped into one edit.
pub fn edits_from_chars(old: &str, new: &str) -> Vec<Edit> {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_chars(old, new);

    let mut edits: Vec<Edit> = Vec::new();
    for change in diff.iter_all_changes() {
        let value = change.value();
        match edits.last_mut() {
            Some(last) if last.tag == change.tag() => last.text.push_str(value),
            _ => edits.push(Edit::new(change.tag(), value)),
        }
    }
    edits
}

/// Reduce the number of edits by eliminating semantically trivial
/// equalities, then align the remaining edits to word boundaries and split
/// overlapping delete/insert pairs.
pub fn cleanup_semantic(edits: &mut Vec<Edit>) {
    let mut changes = false;
    // Indices of equalities seen so far that may still be eliminated.
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<String> = None;
    // Inserted/deleted chars before and after the last equality.
    let (mut ins_before, mut del_before) = (0usize, 0usize);
    let (mut ins_after, mut del_after) = (0usize, 0usize);
    let mut pointer = 0usize;

    while pointer < edits.len() {
        if edits[pointer].tag == ChangeTag::Equal {
            equalities.push(pointer);
            ins_before = ins_after;
            del_before = del_after;
            ins_after = 0;
            del_after = 0;
            last_equality = Some(edits[pointer].text.clone());
            pointer += 1;
            continue;
        }

        if edits[pointer].tag == ChangeTag::Insert {
            ins_after += edits[pointer].char_len();
        } else {
            del_after += edits[pointer].char_len();
        }

        let trivial = match &last_equality {
            Some(eq) if !eq.is_empty() => {
                let len = eq.chars().count();
                len <= ins_before.max(del_before) && len <= ins_after.max(del_after)
            }
            _ => false,
        };

        if trivial {
            if let (Some(index), Some(text)) = (equalities.pop(), last_equality.take()) {
                // Replace the equality with a delete followed by an insert.
                edits.insert(index, Edit::delete(text));
                edits[index + 1].tag = ChangeTag::Insert;
            }
            // The previous equality must be re-evaluated.
            equalities.pop();
            ins_before = 0;
            del_before = 0;
            ins_after = 0;
            del_after = 0;
            changes = true;
            pointer = equalities.last().map_or(0, |&p| p + 1);
            continue;
        }

        pointer += 1;
    }

    if changes {
        cleanup_merge(edits);
    }
    cleanup_semantic_lossless(edits);
    split_overlaps(edits);
}

/// Split each delete/insert pair whose texts overlap (a suffix of one is a
/// prefix of the other) by at least half of either text around the
/// overlap, which becomes an equality.
fn split_overlaps(edits: &mut Vec<Edit>) {
    let mut pointer = 1usize;
    while pointer < edits.len() {
        if edits[pointer - 1].tag == ChangeTag::Delete && edits[pointer].tag == ChangeTag::Insert {
            let deletion = mem::take(&mut edits[pointer - 1].text);
            let insertion = mem::take(&mut edits[pointer].text);
            let del_len = deletion.chars().count();
            let ins_len = insertion.chars().count();
            let forward = common_overlap(&deletion, &insertion);
            let backward = common_overlap(&insertion, &deletion);
            let forward_len = forward.chars().count();
            let backward_len = backward.chars().count();

            if forward_len >= backward_len
                && (forward_len * 2 >= del_len || forward_len * 2 >= ins_len)
            {
                // delete "abcxxx", insert "xxxdef" -> delete "abc", equal "xxx", insert "def"
                let split = forward.len();
                edits[pointer - 1].text = deletion[..deletion.len() - split].to_string();
                edits[pointer].text = insertion[split..].to_string();
                edits.insert(pointer, Edit::equal(&insertion[..split]));
                pointer += 1;
            } else if forward_len < backward_len
                && (backward_len * 2 >= del_len || backward_len * 2 >= ins_len)
            {
                // delete "xxxdef", insert "abcxxx" -> insert "abc", equal "xxx", delete "def"
                let split = backward.len();
                edits[pointer - 1] = Edit::insert(&insertion[..insertion.len() - split]);
                edits[pointer] = Edit::delete(&deletion[split..]);
                edits.insert(pointer, Edit::equal(&deletion[..split]));
                pointer += 1;
            } else {
                edits[pointer - 1].text = deletion;
                edits[pointer].text = insertion;
            }
            pointer += 1;
        }
        pointer += 1;
    }
}

/// Slide single edits surrounded by equalities sideways so that their
/// edges fall on the most natural boundary (blank line, line break, space,
/// punctuation), without changing what is inserted or deleted.
fn cleanup_semantic_lossless(edits: &mut Vec<Edit>) {
    let mut pointer = 1usize;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].tag == ChangeTag::Equal && edits[pointer + 1].tag == ChangeTag::Equal {
            let mut before = edits[pointer - 1].text.clone();
            let mut edit = edits[pointer].text.clone();
            let mut after = edits[pointer + 1].text.clone();

            // Shift the edit as far left as possible.
            let suffix = common_suffix(&before, &edit);
            if suffix > 0 {
                let common = edit[edit.len() - suffix..].to_string();
                before.truncate(before.len() - suffix);
                edit = format!("{common}{}", &edit[..edit.len() - suffix]);
                after = format!("{common}{after}");
            }

            // Step right one char at a time, keeping the best-scoring split.
            let mut best = (before.clone(), edit.clone(), after.clone());
            let mut best_score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
            loop {
                let (Some(c), Some(d)) = (edit.chars().next(), after.chars().next()) else {
                    break;
                };
                if c != d {
                    break;
                }
                before.push(c);
                edit = format!("{}{c}", &edit[c.len_utf8()..]);
                after.drain(..c.len_utf8());
                let score = boundary_score(&before, &edit) + boundary_score(&edit, &after);
                // `>=` prefers the rightmost of equally good positions.
                if score >= best_score {
                    best_score = score;
                    best = (before.clone(), edit.clone(), after.clone());
                }
            }

            let (best_before, best_edit, best_after) = best;
            if edits[pointer - 1].text != best_before {
                if best_before.is_empty() {
                    edits.remove(pointer - 1);
                    pointer -= 1;
                } else {
                    edits[pointer - 1].text = best_before;
                }
                edits[pointer].text = best_edit;
                if best_after.is_empty() {
                    edits.remove(pointer + 1);
                    pointer = pointer.saturating_sub(1);
                } else {
                    edits[pointer + 1].text = best_after;
                }
            }
        }
        pointer += 1;
    }
}

/// Score how natural the boundary between `one` and `two` is, from 0
/// (inside a word) to 6 (edge of the string).
fn boundary_score(one: &str, two: &str) -> u32 {
    let (Some(c1), Some(c2)) = (one.chars().next_back(), two.chars().next()) else {
        return 6;
    };

    let non_alnum1 = !c1.is_alphanumeric();
    let non_alnum2 = !c2.is_alphanumeric();
    let space1 = non_alnum1 && c1.is_whitespace();
    let space2 = non_alnum2 && c2.is_whitespace();
    let break1 = space1 && (c1 == '\n' || c1 == '\r');
    let break2 = space2 && (c2 == '\n' || c2 == '\r');
    let blank1 = break1 && (one.ends_with("\n\n") || one.ends_with("\n\r\n"));
    let blank2 = break2
        && ["\n\n", "\n\r\n", "\r\n\n", "\r\n\r\n"]
            .iter()
            .any(|p| two.starts_with(p));

    if blank1 || blank2 {
        5
    } else if break1 || break2 {
        4
    } else if non_alnum1 && !space1 && space2 {
        3
    } else if space1 || space2 {
        2
    } else if non_alnum1 || non_alnum2 {
        1
    } else {
        0
    }
}

/// Merge runs of the same tag, factor common prefixes and suffixes out of
/// delete/insert pairs, and shift single edits sideways to absorb
/// neighbouring equalities. Zero-length edits are removed.
pub fn cleanup_merge(edits: &mut Vec<Edit>) {
    edits.retain(|e| !e.text.is_empty());
    // Sentinel so the last run is flushed.
    edits.push(Edit::equal(""));

    let mut pointer = 0usize;
    let (mut count_del, mut count_ins) = (0usize, 0usize);
    let (mut text_del, mut text_ins) = (String::new(), String::new());

    while pointer < edits.len() {
        match edits[pointer].tag {
            ChangeTag::Insert => {
                count_ins += 1;
                text_ins.push_str(&edits[pointer].text);
                pointer += 1;
            }
            ChangeTag::Delete => {
                count_del += 1;
                text_del.push_str(&edits[pointer].text);
                pointer += 1;
            }
            ChangeTag::Equal => {
                if count_del + count_ins > 1 {
                    if count_del != 0 && count_ins != 0 {
                        let prefix = common_prefix(&text_ins, &text_del);
                        if prefix > 0 {
                            let start = pointer - count_del - count_ins;
                            let common = &text_ins[..prefix];
                            if start > 0 && edits[start - 1].tag == ChangeTag::Equal {
                                edits[start - 1].text.push_str(common);
                            } else {
                                edits.insert(0, Edit::equal(common));
                                pointer += 1;
                            }
                            text_ins.drain(..prefix);
                            text_del.drain(..prefix);
                        }
                        let suffix = common_suffix(&text_ins, &text_del);
                        if suffix > 0 {
                            let common = text_ins.split_off(text_ins.len() - suffix);
                            text_del.truncate(text_del.len() - suffix);
                            edits[pointer].text.insert_str(0, &common);
                        }
                    }

                    let run = count_del + count_ins;
                    pointer -= run;
                    let mut replacement = Vec::with_capacity(2);
                    if !text_del.is_empty() {
                        replacement.push(Edit::delete(mem::take(&mut text_del)));
                    }
                    if !text_ins.is_empty() {
                        replacement.push(Edit::insert(mem::take(&mut text_ins)));
                    }
                    let inserted = replacement.len();
                    edits.splice(pointer..pointer + run, replacement);
                    pointer += inserted;
                }

                if pointer != 0 && edits[pointer - 1].tag == ChangeTag::Equal {
                    let text = edits.remove(pointer).text;
                    edits[pointer - 1].text.push_str(&text);
                } else {
                    pointer += 1;
                }

                count_del = 0;
                count_ins = 0;
                text_del.clear();
                text_ins.clear();
            }
        }
    }

    if edits.last().is_some_and(|e| e.text.is_empty()) {
        edits.pop();
    }

    // Second pass: a single edit surrounded by equalities may be shifted
    // into one of them, e.g. A<ins>BA</ins>C -> <ins>AB</ins>AC.
    let mut changes = false;
    let mut pointer = 1usize;
    while pointer + 1 < edits.len() {
        if edits[pointer - 1].tag == ChangeTag::Equal && edits[pointer + 1].tag == ChangeTag::Equal {
            let prev = edits[pointer - 1].text.clone();
            let next = edits[pointer + 1].text.clone();
            if edits[pointer].text.ends_with(&prev) {
                let cur = &edits[pointer].text;
                let shifted = format!("{prev}{}", &cur[..cur.len() - prev.len()]);
                edits[pointer].text = shifted;
                edits[pointer + 1].text = format!("{prev}{next}");
                edits.remove(pointer - 1);
                changes = true;
            } else if edits[pointer].text.starts_with(&next) {
                edits[pointer - 1].text.push_str(&next);
                let cur = &edits[pointer].text;
                let shifted = format!("{}{next}", &cur[next.len()..]);
                edits[pointer].text = shifted;
                edits.remove(pointer + 1);
                changes = true;
            }
        }
        pointer += 1;
    }

    if changes {
        cleanup_merge(edits);
    }
}

/// Byte length of the common prefix, always on a char boundary.
fn common_prefix(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}

/// Byte length of the common suffix, always on a char boundary.
fn common_suffix(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}

/// The longest suffix of `a` that is also a prefix of `b`.
fn common_overlap<'b>(a: &str, b: &'b str) -> &'b str {
    let max = a.len().min(b.len());
    let end = b
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= max)
        .filter(|&end| a.ends_with(&b[..end]))
        .last()
        .unwrap_or(0);
    &b[..end]
}
