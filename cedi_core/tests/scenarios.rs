//! End-to-end session scenarios and exhaustive sweeps over small documents

use cedi_core::cursor::{move_down, move_left, move_right, move_up};
use cedi_core::edit::{delete_next, delete_prev, insert_char, insert_newline};
use cedi_core::{
    decode_utf8, encode_utf8, Cursor, CursorRules, Document, EditorCommand, EditorOptions,
    EditorSession, MonospaceMetrics, Newline, VerticalMove, Viewport,
};
use sha2::{Digest, Sha256};

const METRICS: MonospaceMetrics = MonospaceMetrics::new(8.0, 16.0);

/// Every string of length 0..=3 over a small alphabet with both terminators
fn small_texts() -> Vec<String> {
    let alphabet = ['a', '\n', '\r', '\t'];
    let mut texts = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..3 {
        let mut next = Vec::new();
        for prefix in &frontier {
            for ch in alphabet {
                let mut text = prefix.clone();
                text.push(ch);
                next.push(text);
            }
        }
        texts.extend(next.iter().cloned());
        frontier = next;
    }
    texts
}

fn all_rules() -> [CursorRules; 2] {
    [CursorRules::new(true), CursorRules::new(false)]
}

fn all_cursors(doc: &Document, rules: CursorRules) -> Vec<Cursor> {
    (0..doc.line_count())
        .flat_map(|line| {
            (0..=doc.max_cursor_column(line, rules.draw_whitespace)).map(move |column| Cursor::new(line, column))
        })
        .collect()
}

fn session(text: &str, height: f32) -> EditorSession {
    let mut session = EditorSession::new(Viewport::new(640.0, height), EditorOptions::default());
    session.load_bytes(text.as_bytes());
    session
}

fn hundred_lines() -> String {
    (0..100).map(|i| format!("line {}\n", i)).collect()
}

#[test]
fn test_documents_never_empty_and_terminated() {
    for text in small_texts() {
        let doc = Document::from_str(&text);
        assert!(doc.line_count() >= 1, "{:?}", text);
        for line in &doc.lines()[..doc.line_count() - 1] {
            assert!(line.has_terminator(), "{:?}", text);
        }
        assert_eq!(doc.as_string(), text);
    }
}

#[test]
fn test_max_cursor_column_formula() {
    for text in small_texts() {
        let doc = Document::from_str(&text);
        for line in doc.lines() {
            let nw = line.newline_width();
            assert_eq!(line.max_cursor_column(true), line.len() - nw);
            assert_eq!(line.max_cursor_column(false), line.len() - usize::from(nw > 0));
            assert!(line.max_cursor_column(false) <= line.len());
        }
    }
}

#[test]
fn test_right_then_left_round_trip() {
    for text in small_texts() {
        let doc = Document::from_str(&text);
        for rules in all_rules() {
            let last = doc.line_count() - 1;
            let end = Cursor::new(last, doc.max_cursor_column(last, rules.draw_whitespace));
            for cursor in all_cursors(&doc, rules) {
                if cursor == end {
                    continue;
                }
                let right = move_right(&doc, cursor, rules);
                assert_eq!(move_left(&doc, right, rules), cursor, "{:?} {:?}", text, cursor);
            }
        }
    }
}

#[test]
fn test_moves_keep_cursor_valid() {
    for text in small_texts() {
        let doc = Document::from_str(&text);
        for rules in all_rules() {
            for cursor in all_cursors(&doc, rules) {
                for moved in [
                    move_left(&doc, cursor, rules),
                    move_right(&doc, cursor, rules),
                    move_up(&doc, cursor, rules),
                    move_down(&doc, cursor, rules),
                ] {
                    assert!(moved.is_valid(&doc, rules), "{:?} {:?} -> {:?}", text, cursor, moved);
                }
            }
        }
    }
}

#[test]
fn test_newline_then_backspace_restores_everywhere() {
    for text in small_texts() {
        let original = Document::from_str(&text);
        for rules in all_rules() {
            for cursor in all_cursors(&original, rules) {
                // a cursor on a hidden terminator edits at the content end
                let expected = Cursor::new(cursor.line, cursor.edit_column(&original));
                let mut doc = original.clone();
                let split = insert_newline(&mut doc, cursor, rules).unwrap();
                if split.fused {
                    // the new terminator paired with a neighbour; one backspace cannot undo that
                    continue;
                }
                let back = delete_prev(&mut doc, split.cursor, rules).unwrap();
                assert_eq!(doc, original, "{:?} {:?}", text, cursor);
                assert_eq!(back.cursor, expected, "{:?} {:?}", text, cursor);
            }
        }
    }
}

/// Saving and reopening must give back exactly the same lines
fn assert_reloads_same(doc: &Document, context: &str) {
    let reloaded = Document::decode(&doc.to_utf8(false)).document;
    assert_eq!(reloaded.lines(), doc.lines(), "{}", context);
}

#[test]
fn test_edits_keep_cursor_valid_and_never_fail() {
    for text in small_texts() {
        let original = Document::from_str(&text);
        for rules in all_rules() {
            for cursor in all_cursors(&original, rules) {
                let context = format!("{:?} at {:?}", text, cursor);

                let mut doc = original.clone();
                let outcome = insert_char(&mut doc, cursor, rules, 'x').unwrap();
                assert!(outcome.cursor.is_valid(&doc, rules), "{}", context);
                assert_reloads_same(&doc, &context);

                let mut doc = original.clone();
                let outcome = insert_newline(&mut doc, cursor, rules).unwrap();
                assert!(outcome.cursor.is_valid(&doc, rules), "{}", context);
                assert_reloads_same(&doc, &context);

                let mut doc = original.clone();
                let outcome = delete_prev(&mut doc, cursor, rules).unwrap();
                assert!(outcome.cursor.is_valid(&doc, rules), "{}", context);
                assert_reloads_same(&doc, &context);

                let mut doc = original.clone();
                let outcome = delete_next(&mut doc, cursor, rules).unwrap();
                assert!(outcome.cursor.is_valid(&doc, rules), "{}", context);
                assert_reloads_same(&doc, &context);
            }
        }
    }
}

#[test]
fn test_edits_with_other_newline_reload_the_same() {
    for text in small_texts() {
        for newline in [Newline::Lf, Newline::Cr, Newline::CrLf, Newline::LfCr] {
            let mut original = Document::from_str(&text);
            original.set_newline(newline);
            for cursor in all_cursors(&original, CursorRules::new(false)) {
                let mut doc = original.clone();
                insert_newline(&mut doc, cursor, CursorRules::new(false)).unwrap();
                assert_reloads_same(&doc, &format!("{:?} {:?} at {:?}", text, newline, cursor));
            }
        }
    }
}

#[test]
fn test_backspace_next_to_lone_cr_keeps_line_count_on_reload() {
    let mut s = session("x\ry\n", 160.0);
    s.apply_command(EditorCommand::MoveDown, &METRICS);
    s.apply_command(EditorCommand::MoveRight, &METRICS);
    s.apply_command(EditorCommand::DeletePrev, &METRICS);

    let saved = s.to_bytes();
    let mut reopened = session("", 160.0);
    reopened.load_bytes(&saved);
    assert_eq!(reopened.document().line_count(), s.document().line_count());
    assert_eq!(reopened.document().lines(), s.document().lines());
}

#[test]
fn test_codec_round_trip_over_planes() {
    let samples: Vec<char> = ['\0', 'a', '\u{7F}', '\u{80}', 'ß', '\u{7FF}', '\u{800}', 'あ', '\u{FFFD}', '\u{FFFF}', '\u{10000}', '😀', '\u{10FFFF}']
        .into_iter()
        .collect();
    let bytes = encode_utf8(&samples);
    let decoded = decode_utf8(&bytes);
    assert!(decoded.errors.is_empty());
    assert_eq!(decoded.text, samples);
}

#[test]
fn test_terminator_pairs() {
    assert_eq!(Document::from_str("a\r\nb").line_count(), 2);
    assert_eq!(Document::from_str("a\n\rb").line_count(), 2);
    assert_eq!(Document::from_str("a\n\nb").line_count(), 3);
}

#[test]
fn test_move_down_and_insert() {
    let mut s = session("ab\ncd\n", 320.0);
    assert_eq!(s.cursor(), Cursor::zero());
    s.apply_command(EditorCommand::MoveDown, &METRICS);
    assert_eq!(s.cursor(), Cursor::new(1, 0));
    s.apply_command(EditorCommand::InsertChar('X'), &METRICS);
    assert_eq!(s.document().line(1).map(|l| l.as_string()), Some("Xcd\n".to_string()));
    assert_eq!(s.cursor(), Cursor::new(1, 1));
}

#[test]
fn test_backspace_to_empty() {
    let mut s = session("abc", 320.0);
    for _ in 0..3 {
        s.apply_command(EditorCommand::MoveRight, &METRICS);
    }
    assert_eq!(s.cursor(), Cursor::new(0, 3));
    for _ in 0..3 {
        s.apply_command(EditorCommand::DeletePrev, &METRICS);
    }
    assert_eq!(s.cursor(), Cursor::zero());
    assert_eq!(s.document().as_string(), "");

    let damage = s.apply_command(EditorCommand::DeletePrev, &METRICS);
    assert_eq!(damage.text, None);
    assert!(!damage.cursor_moved);
    assert_eq!(s.document().line_count(), 1);
}

#[test]
fn test_scroll_follows_cursor_to_the_end() {
    // ten full rows plus a partial one
    let height = 16.0 * 10.5;
    for start in [-5, 0, 40, 94] {
        let mut s = session(&hundred_lines(), height);
        s.apply_command(EditorCommand::MouseScroll(start), &METRICS);
        for _ in 0..99 {
            s.apply_command(EditorCommand::MoveDown, &METRICS);
        }
        assert_eq!(s.cursor().line, 99);
        assert_eq!(s.scroll(), 90, "starting scroll {}", start);
    }
}

#[test]
fn test_mouse_scroll_up_near_top() {
    for text in ["", "one line", "a\nb\nc"] {
        let mut s = session(text, 320.0);
        for _ in 0..10 {
            s.apply_command(EditorCommand::MouseScroll(-5), &METRICS);
        }
        let visible = s.visible_line_count(&METRICS) as i64;
        let margin = (visible as f32 * s.options().overscroll_fraction) as i64;
        assert_eq!(s.scroll(), -margin.min(visible - 1), "{:?}", text);
    }
}

/// Small deterministic generator so the sequences are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn random_command(rng: &mut Lcg) -> EditorCommand {
    match rng.next() % 20 {
        0 => EditorCommand::MoveLeft,
        1 => EditorCommand::MoveRight,
        2 => EditorCommand::MoveUp,
        3 => EditorCommand::MoveDown,
        4 => EditorCommand::PageUp,
        5 => EditorCommand::PageDown,
        6 => EditorCommand::MouseScroll(rng.next() as i32 % 7 - 3),
        7 => EditorCommand::InsertChar('z'),
        8 => EditorCommand::InsertChar('\r'),
        9 => EditorCommand::InsertTab,
        10 | 11 => EditorCommand::InsertNewline,
        12 | 13 => EditorCommand::DeletePrev,
        14 => EditorCommand::DeleteNext,
        15 => EditorCommand::ToggleDrawWhitespace,
        16 => EditorCommand::AdjustTabWidth(if rng.next() % 2 == 0 { 1 } else { -1 }),
        17 => EditorCommand::StartSelection,
        18 => EditorCommand::CancelSelection,
        _ => EditorCommand::Resize {
            width: 640.0,
            height: (rng.next() % 400) as f32,
        },
    }
}

#[test]
fn test_any_command_sequence_keeps_cursor_valid() {
    for seed in 0..20u64 {
        let mut rng = Lcg(seed);
        let mut s = session("first\r\nsecond\n\rthird\n\nlast", 160.0);
        for _ in 0..400 {
            let command = random_command(&mut rng);
            s.apply_command(command.clone(), &METRICS);
            s.tick(1.0 / 60.0);

            let rules = s.options().cursor_rules();
            assert!(s.cursor().is_valid(s.document(), rules), "seed {} after {:?}", seed, command);
            if let Some(anchor) = s.select_cursor() {
                assert!(anchor.is_valid(s.document(), rules));
            }
            assert!(s.options().tab_spaces >= 1);
            assert!(s.document().line_count() >= 1);
            assert_reloads_same(s.document(), &format!("seed {} after {:?}", seed, command));
        }
    }
}

#[test]
fn test_nearest_pixel_sequences_keep_cursor_valid() {
    let options = EditorOptions {
        vertical_move: VerticalMove::NearestPixel,
        ..EditorOptions::default()
    };
    let mut rng = Lcg(7);
    let mut s = EditorSession::new(Viewport::new(640.0, 160.0), options);
    s.load_bytes("あい\tb\nabc\r\n\n\u{7}x".as_bytes());
    for _ in 0..500 {
        s.apply_command(random_command(&mut rng), &METRICS);
        assert!(s.cursor().is_valid(s.document(), s.options().cursor_rules()));
    }
}

fn replay(commands: &[EditorCommand]) -> Vec<u8> {
    let mut s = session("alpha\nbeta\ngamma", 160.0);
    for command in commands {
        s.apply_command(command.clone(), &METRICS);
    }
    Sha256::digest(s.snapshot().to_bytes()).to_vec()
}

#[test]
fn test_replay_is_deterministic() {
    let mut rng = Lcg(42);
    let commands: Vec<EditorCommand> = (0..200).map(|_| random_command(&mut rng)).collect();
    assert_eq!(replay(&commands), replay(&commands));

    let mut extended = commands.clone();
    extended.push(EditorCommand::InsertChar('q'));
    assert_ne!(replay(&commands), replay(&extended));
}

#[test]
fn test_layout_matches_cursor_after_edits() {
    let mut s = session("ab\tc\nxyz", 320.0);
    s.apply_command(EditorCommand::MoveRight, &METRICS);
    s.apply_command(EditorCommand::MoveRight, &METRICS);
    s.apply_command(EditorCommand::MoveRight, &METRICS);
    let layout = s.layout(&METRICS);
    let rect = layout.cursor_rect(s.cursor()).unwrap();
    // "ab" then a tab stop at 4 cells
    assert_eq!(rect.x, 32.0);
    assert_eq!(layout.hit_test(rect.x + 1.0, rect.y + 1.0), Some(s.cursor()));
}
