#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use strbuf::{ByteStr, ByteString, StringError, TERMINATOR};

/// One operation against the byte string. Positions are raw so the fuzzer
/// also reaches negative and out-of-range arguments.
#[derive(Arbitrary, Debug)]
enum Op {
    Insert(i8, u8),
    Remove(i8),
    Modify(i8, u8),
    Concat(Vec<u8>),
    Copy(Vec<u8>),
    Advance(i8),
    Rewind,
    SliceOwned(i8, i8),
    ReplaceFirst(u8, Vec<u8>, Vec<u8>),
    ReplaceAll(Vec<u8>, Vec<u8>),
    Freeze,
}

#[derive(Arbitrary, Debug)]
struct Input {
    seed: Vec<u8>,
    ops: Vec<Op>,
}

/// Reference model: everything in front of the offset followed by the
/// visible window.
struct Model {
    bytes: Vec<u8>,
    offset: usize,
}

impl Model {
    fn window(&self) -> &[u8] {
        &self.bytes[self.offset..]
    }

    fn len(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Index into the window, negative values counting back from `len`.
    fn index(&self, position: i8, len: usize) -> usize {
        let step = usize::from(position.unsigned_abs());
        if position >= 0 { step } else { len - step }
    }

    fn find(&self, from: usize, key: &[u8]) -> Option<usize> {
        let w = self.window();
        (from..=w.len().checked_sub(key.len())?).find(|&i| w[i..].starts_with(key))
    }

    fn splice(&mut self, at: usize, key_len: usize, rep: &[u8]) {
        let at = self.offset + at;
        self.bytes.splice(at..at + key_len, rep.iter().copied());
    }
}

fn check(s: &ByteString, m: &Model) {
    assert!(s.len() <= s.capacity());
    assert_eq!(s.as_bytes(), m.window());
    assert_eq!(s.offset(), m.offset);
    let mut rewound = s.consumed().as_bytes().to_vec();
    rewound.extend_from_slice(s.as_bytes());
    assert_eq!(rewound, m.bytes);
}

fn run(input: Input) {
    let Ok(mut s) = ByteString::init_from(&input.seed) else {
        return;
    };
    let mut m = Model {
        bytes: input.seed,
        offset: 0,
    };
    let mut spans = Vec::new();
    for op in input.ops {
        let frozen = !s.is_mutable();
        let len = m.len();
        let result = match op {
            Op::Insert(pos, b) => s.insert(pos.into(), b).map(|()| {
                let i = m.index(pos, len + 1);
                m.bytes.insert(m.offset + i, b);
            }),
            Op::Remove(pos) => s.remove(pos.into()).map(|removed| {
                let i = m.index(pos, len);
                assert_eq!(m.bytes.remove(m.offset + i), removed);
            }),
            Op::Modify(pos, b) => s.modify(pos.into(), b).map(|()| {
                let i = m.index(pos, len);
                if b == TERMINATOR {
                    m.bytes.truncate(m.offset + len.min(i));
                } else if i < len {
                    m.bytes[m.offset + i] = b;
                } else {
                    // Writing past the end exposes whatever the allocation
                    // already held in between.
                    m.bytes.extend_from_slice(&s.as_bytes()[len..i]);
                    m.bytes.push(b);
                }
            }),
            Op::Concat(bytes) => s.concat(&bytes).map(|()| m.bytes.extend(bytes)),
            Op::Copy(bytes) => s.copy_from(&bytes).map(|()| {
                m.bytes.truncate(m.offset);
                m.bytes.extend(bytes);
            }),
            Op::Advance(delta) => s.advance_offset(delta.into()).map(|()| {
                m.offset = m.offset.checked_add_signed(delta.into()).unwrap();
            }),
            Op::Rewind => {
                s.rewind();
                m.offset = 0;
                Ok(())
            }
            Op::SliceOwned(start, end) => s.slice_owned(start.into(), end.into()).map(|span| {
                let (from, to) = (m.index(start, len), m.index(end, len + 1));
                let moved = m.window()[from..to].to_vec();
                let at = m.offset;
                m.bytes[at..at + to].rotate_left(from);
                m.offset += to - from;
                assert_eq!(s.resolve(span).unwrap().as_bytes(), moved.as_slice());
                spans.push(span);
            }),
            Op::ReplaceFirst(start, key, rep) => {
                s.replace_first(start.into(), &key, &rep).map(|next| {
                    let found = (!key.is_empty())
                        .then(|| m.find(usize::from(start), &key))
                        .flatten();
                    assert_eq!(next, found.map(|at| at + rep.len()));
                    if let Some(at) = found {
                        m.splice(at, key.len(), &rep);
                    }
                })
            }
            Op::ReplaceAll(key, rep) => {
                // Bound the work: a tiny key in a large buffer is fine, the
                // call itself must terminate.
                if key.len() > 8 || rep.len() > 8 {
                    continue;
                }
                s.replace_all(&key, &rep).map(|count| {
                    let mut expected = 0;
                    if !key.is_empty() && key != rep {
                        let mut from = 0;
                        while let Some(at) = m.find(from, &key) {
                            m.splice(at, key.len(), &rep);
                            from = at + rep.len();
                            expected += 1;
                        }
                    }
                    assert_eq!(count, expected);
                })
            }
            Op::Freeze => {
                s.freeze();
                Ok(())
            }
        };
        if let Err(StringError::IllegalMutation) = result {
            assert!(frozen);
        }
        // Failed operations leave the model untouched, so this also checks
        // that errors never mutate.
        check(&s, &m);
        for span in &spans {
            // Spans stay resolvable for the life of the allocation.
            let _ = s.resolve(*span).expect("span outlived its allocation");
        }
        if s.len() > 1 << 16 {
            return;
        }
    }
}

fuzz_target!(|input: Input| run(input));
