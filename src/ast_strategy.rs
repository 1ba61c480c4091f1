//! Property-based testing strategies for [`ast::Term`] and [`ast::Formula`].

use crate::ast::{Formula, Term};
use proptest::prelude::*;

pub fn arb_var_name() -> impl Strategy<Value = String> {
    "[a-z]{1,3}"
}

pub fn arb_term(max_depth: u32, max_size: u32) -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        arb_var_name().prop_map(|v| Term::var(&v)),
        any::<i16>().prop_map(|c| Term::Const(c as i64)),
        (any::<i16>(), arb_var_name()).prop_map(|(c, v)| Term::mult(c as i64, &v)),
    ];
    leaf.prop_recursive(max_depth, max_size, max_size, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Term::add(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Term::sub(l, r)),
        ]
    })
}

pub fn arb_atomic_formula(max_depth: u32, max_size: u32) -> impl Strategy<Value = Formula> {
    (arb_term(max_depth, max_size), arb_term(max_depth, max_size))
        .prop_map(|(l, r)| Formula::le(l, r))
}

pub fn arb_formula(max_depth: u32, max_size: u32) -> impl Strategy<Value = Formula> {
    let leaf = arb_atomic_formula(max_depth, max_size);
    leaf.prop_recursive(max_depth, max_size, max_size, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::not),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Formula::and(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Formula::or(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Formula::implies(p, q)),
            (inner.clone(), inner.clone()).prop_map(|(p, q)| Formula::iff(p, q)),
            (arb_var_name(), inner.clone()).prop_map(|(v, p)| Formula::exists(&v, p)),
            (arb_var_name(), inner).prop_map(|(v, p)| Formula::forall(&v, p)),
        ]
    })
}
