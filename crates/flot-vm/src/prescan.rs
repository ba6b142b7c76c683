//! Two-pass prescanner.
//!
//! Runs once at machine construction and establishes the location of all
//! global and local labels, the values of all literals, and a branch-target
//! table covering every statically resolvable branch, so that dispatch is a
//! flat switch with O(1) arms.
//!
//! Local backward branches (`B`) are resolved in the forward pass; local
//! forward branches (`F`) in the reverse pass. Each pass keeps the most
//! recent location per label byte it has seen, making lookup O(1).
//!
//! Conditional branches are resolved in the reverse pass with a stack of
//! `(after_then, after_else)` frames: crossing a `;` pushes a frame whose
//! targets are the instruction after it, crossing a `:` takes the frame's
//! else-target and records its own successor as the then-target, and
//! crossing a `?` takes the then-target and pops. A sentinel frame keeps an
//! orphan `?` pointed at the terminating PC. Prescanning never fails;
//! malformed constructs resolve to the terminating PC.
//!
//! A final pass collapses chains of branches to unconditional branches down
//! to a single branch, and redirects global labels whose recorded location
//! would land on one.

use std::collections::HashMap;

use log::debug;
use smallvec::{SmallVec, smallvec};

use crate::number::parse_literal;
use crate::program::{Program, TERMINATE_BYTE, fix_ws};
use crate::value::{Loc, TERMINATE_LOC, Value, int};

/// Branch tables and literal caches, immutable after construction.
pub struct Prescan {
    /// Indexed by the PC *after* fetching the opcode. Defaults to the
    /// terminating PC.
    branch_target: Vec<Loc>,
    /// Parsed literals keyed by their start PC.
    literals: HashMap<Loc, (Value, Loc)>,
    /// Global labels keyed by exact bit pattern; the last definition wins.
    global_labels: HashMap<u64, Loc>,
}

/// Pending conditional construct discovered by the reverse pass.
struct ThenElse {
    after_then: Loc,
    after_else: Loc,
}

/// Opcodes whose sole dispatch effect is `pc = branch_target[pc]`.
fn is_pass_through(byte: u8) -> bool {
    matches!(byte, b'L' | b'F' | b'B' | b'@' | b':' | b';' | b' ')
}

impl Prescan {
    pub fn build(prog: &Program) -> Self {
        let mut scan = Self {
            branch_target: vec![TERMINATE_LOC; prog.len() as usize + 1],
            literals: HashMap::new(),
            global_labels: HashMap::new(),
        };
        scan.forward_pass(prog);
        scan.reverse_pass(prog);
        scan.collapse_chains(prog);
        scan.retarget_global_labels(prog);
        scan
    }

    /// Pre-resolved target for the branch opcode fetched just before `loc`.
    pub fn branch_target(&self, loc: Loc) -> Loc {
        usize::try_from(loc)
            .ok()
            .and_then(|idx| self.branch_target.get(idx))
            .copied()
            .unwrap_or(TERMINATE_LOC)
    }

    /// The cached parse for the literal starting at `loc`, falling back to
    /// a fresh parse for starts the prescan never saw (a jump into the
    /// middle of a literal).
    pub fn literal(&self, prog: &Program, loc: Loc) -> (Value, Loc) {
        match self.literals.get(&loc) {
            Some(&cached) => cached,
            None => parse_literal(prog, loc),
        }
    }

    /// Location recorded for a global label, if any.
    pub fn global_label(&self, label: Value) -> Option<Loc> {
        self.global_labels.get(&label.to_bits()).copied()
    }

    /// Resolves a destination value into a PC. Negative values are the
    /// bitwise inverse of an encoded PC; positive normal values name global
    /// labels. Anything else (zero, subnormal, infinity, NaN, or a label
    /// that was never defined) resolves to the terminating PC.
    pub fn resolve(&self, dst: Value) -> Loc {
        if dst < 0.0 {
            return !int(dst);
        }
        if dst.is_normal()
            && let Some(&loc) = self.global_labels.get(&dst.to_bits())
        {
            return loc;
        }
        TERMINATE_LOC
    }

    fn cache_literal(&mut self, prog: &Program, start: Loc) -> (Value, Loc) {
        if let Some(&cached) = self.literals.get(&start) {
            return cached;
        }
        let parsed = parse_literal(prog, start);
        self.literals.insert(start, parsed);
        parsed
    }

    /// Forward pass: literal predecoding, global-label definitions, and
    /// backward local branches.
    fn forward_pass(&mut self, prog: &Program) {
        let mut recent_local = [TERMINATE_LOC; 256];
        let mut loc: Loc = 0;

        while loc < prog.len() {
            let bytecode = fix_ws(prog.byte_at(loc));
            loc += 1;

            match bytecode {
                // The label selector is taken verbatim: any byte names a
                // label, including whitespace, digits, and `.` (a digit
                // selector is parsed as a literal right after, so it is
                // legal but treacherous).
                b'L' => recent_local[prog.byte_at(loc) as usize] = loc + 1,
                b'B' => {
                    self.branch_target[loc as usize] =
                        recent_local[prog.byte_at(loc) as usize];
                }

                b'@' => {
                    let (val, after) = self.cache_literal(prog, loc);
                    self.global_labels.insert(val.to_bits(), after);
                    self.branch_target[loc as usize] = after;
                    // Jumping into the middle of a global label definition
                    // still parses correctly at run time; skip ahead for
                    // the common case.
                    loc = after;
                }

                b'0'..=b'9' | b'.' => {
                    let (_, after) = self.cache_literal(prog, loc - 1);
                    loc = after;
                }

                _ => {}
            }
        }
    }

    /// Reverse pass: forward local branches, conditional constructs, and
    /// whitespace skip targets.
    fn reverse_pass(&mut self, prog: &Program) {
        let mut recent_local = [TERMINATE_LOC; 256];
        let mut then_else: SmallVec<[ThenElse; 8]> = smallvec![ThenElse {
            after_then: TERMINATE_LOC,
            after_else: TERMINATE_LOC,
        }];

        let mut prevbyte = TERMINATE_BYTE;
        let mut last_nw = TERMINATE_LOC;
        let (mut lnw1, mut lnw2) = (TERMINATE_LOC, TERMINATE_LOC);

        let mut loc = prog.len();
        while loc > 0 {
            let lloc = loc;
            loc -= 1;
            let currbyte = prog.byte_at(loc);
            let bytecode = fix_ws(currbyte);

            // `;` is excluded from the last-non-whitespace window so that
            // `?`/`:` targets land on the instruction after a closing `;`.
            if bytecode != b' ' && bytecode != b';' {
                lnw2 = lnw1;
                lnw1 = last_nw;
                last_nw = loc;
            }

            match bytecode {
                b'L' => {
                    // Skip the selector; land on the first real instruction.
                    self.branch_target[lloc as usize] = lnw2;
                    recent_local[prevbyte as usize] = loc + 2;
                }
                b'F' => {
                    self.branch_target[lloc as usize] =
                        recent_local[prevbyte as usize];
                }

                b';' => {
                    then_else.push(ThenElse {
                        after_then: last_nw,
                        after_else: last_nw,
                    });
                    self.branch_target[lloc as usize] = last_nw;
                }

                b':' => {
                    // Sentinel frame; never empty.
                    let frame = then_else.last_mut().unwrap();
                    self.branch_target[lloc as usize] = frame.after_else;
                    frame.after_then = lnw1;
                }

                b'?' => {
                    self.branch_target[lloc as usize] =
                        then_else.last().unwrap().after_then;
                    if then_else.len() > 1 {
                        then_else.pop();
                    }
                }

                b' ' => self.branch_target[lloc as usize] = last_nw,

                _ => {}
            }

            // Raw byte, not whitespace-remapped, in case of dodgy labels.
            prevbyte = currbyte;
        }
    }

    /// Collapses branch-to-branch chains: every branch that lands on a
    /// pass-through opcode is retargeted to the end of the chain, and a
    /// chain that runs into `X` is forced to the terminating PC.
    fn collapse_chains(&mut self, prog: &Program) {
        let mut chain: SmallVec<[Loc; 16]> = SmallVec::new();

        for loc in 0..prog.len() {
            let mut from = loc + 1;
            let mut target = self.branch_target[from as usize];
            let mut halted = false;
            let mut hops: Loc = 0;
            chain.clear();

            while target != TERMINATE_LOC {
                let target_byte = fix_ws(prog.byte_at(target));
                chain.push(from);

                if target_byte == TERMINATE_BYTE {
                    halted = true;
                    break;
                }
                if !is_pass_through(target_byte) {
                    break;
                }
                // A chain longer than the program must be cyclic (e.g. a
                // backward branch onto itself); stop following and let
                // dispatch chase it.
                hops += 1;
                if hops > prog.len() {
                    break;
                }
                from = target + 1;
                target = self.branch_target[from as usize];
            }

            let resolved = if halted { TERMINATE_LOC } else { target };
            for &entry in &chain {
                let old = self.branch_target[entry as usize];
                if old != resolved {
                    debug!("branch at {entry} retargeted {old} -> {resolved}");
                    self.branch_target[entry as usize] = resolved;
                }
            }
        }
    }

    /// Propagates chain collapse through the call/goto interface: a global
    /// label whose definition is followed by a pass-through opcode points
    /// straight at that opcode's resolved target.
    fn retarget_global_labels(&mut self, prog: &Program) {
        for loc in self.global_labels.values_mut() {
            if is_pass_through(fix_ws(prog.byte_at(*loc))) {
                *loc = self.branch_target[(*loc + 1) as usize];
            }
        }
    }
}
