//! End-to-end checks of the expression algebra and its canonical
//! string form, built through the model layer.

use oframe_core::{Model, VariableSpec};
use oframe_expr::{ExprError, Expression, IndexSet, KeyValue, RenderOptions};

fn scalar(model: &mut Model) -> Expression {
    model
        .variable(VariableSpec::continuous())
        .expect("variable")
        .to_expr()
}

#[test]
fn scalar_round_trip_matches_canonical_form() {
    let mut model = Model::new();
    let a = scalar(&mut model);
    let b = scalar(&mut model);
    let c = scalar(&mut model);
    let d = scalar(&mut model);

    let expr = (5.0 * a)
        .add(&(3.4 * b))
        .expect("add")
        .sub(&(2.1 * c))
        .expect("sub")
        .add(&(1.123_123_701_927_3 * d))
        .expect("add");

    assert_eq!(
        expr.to_string(),
        "5 x1 +3.4 x2 -2.1 x3 +1.1231237019273 x4"
    );
}

#[test]
fn dimensional_grouping_preserves_source_row_order() {
    let mut model = Model::new();
    let index = IndexSet::from_columns(vec![
        (
            "x",
            vec![
                KeyValue::Int(1),
                KeyValue::Int(2),
                KeyValue::Int(1),
                KeyValue::Int(2),
            ],
        ),
        (
            "y",
            vec![
                KeyValue::Int(1),
                KeyValue::Int(1),
                KeyValue::Int(2),
                KeyValue::Int(2),
            ],
        ),
    ])
    .expect("index");

    let mut blocks = Vec::new();
    for _ in 0..4 {
        blocks.push(
            model
                .variable(VariableSpec::continuous().over(&index))
                .expect("variable")
                .to_expr(),
        );
    }

    let expr = (5.0 * blocks[0].clone())
        .add(&(3.4 * blocks[1].clone()))
        .expect("add")
        .sub(&(2.1 * blocks[2].clone()))
        .expect("sub")
        .add(&(1.123_123_701_927_3 * blocks[3].clone()))
        .expect("add");

    assert_eq!(
        expr.to_string(),
        "[1,1]: 5 x1 +3.4 x5 -2.1 x9 +1.1231237019273 x13\n\
         [2,1]: 5 x2 +3.4 x6 -2.1 x10 +1.1231237019273 x14\n\
         [1,2]: 5 x3 +3.4 x7 -2.1 x11 +1.1231237019273 x15\n\
         [2,2]: 5 x4 +3.4 x8 -2.1 x12 +1.1231237019273 x16"
    );
}

#[test]
fn constant_folds_in_append_order() {
    let mut model = Model::new();
    let x = scalar(&mut model);

    // 5 + 2x: the constant enters first but merges after the variable
    // term of the expression it lands in.
    let expr = 5.0 + 2.0 * x;
    assert_eq!(expr.to_string(), "2 x1 +5");
}

#[test]
fn repeated_terms_merge_in_place() {
    let mut model = Model::new();
    let x = scalar(&mut model);

    let expr = x.add(&x).expect("add").add_constant(2.0).add_constant(3.0);
    assert_eq!(expr.to_string(), "2 x1 +5");
}

#[test]
fn quadratic_divider_scales_display_coefficients() {
    let mut model = Model::new();
    let v1 = scalar(&mut model);
    let v2 = scalar(&mut model);
    let v3 = scalar(&mut model);
    let v4 = scalar(&mut model);

    let expr = (5.0 * v1)
        .sub(&v2.square().expect("square").scale(2.0))
        .expect("sub")
        .add_constant(3.0)
        .add(&(2.0 * v3))
        .expect("add")
        .add(&v4.square().expect("square").scale(4.0))
        .expect("add");

    let options = RenderOptions::new()
        .with_const_variable(true)
        .with_quadratic_divider(2.0);
    assert_eq!(
        expr.to_display_string(&options).expect("render"),
        "5 x1 +3 x0 +2 x3 + [ -4 x2 * x2 +8 x4 * x4 ] / 2"
    );

    let constraint = expr.eq_value(0.0).expect("constraint");
    assert_eq!(
        constraint.to_string(),
        "5 x1 +2 x3 + [ -2 x2 * x2 +4 x4 * x4 ] = -3"
    );
}

#[test]
fn subset_operand_broadcasts_over_missing_columns() {
    let mut model = Model::new();
    let index =
        IndexSet::single("t", vec![KeyValue::Int(1), KeyValue::Int(2)]).expect("index");
    let block = model
        .variable(VariableSpec::continuous().over(&index))
        .expect("variable")
        .to_expr();
    let scalar = scalar(&mut model);

    let expr = block.add(&scalar).expect("broadcast");
    assert_eq!(expr.to_string(), "[1]: x1 +x3\n[2]: x2 +x3");
}

#[test]
fn disjoint_dimension_sets_are_rejected() {
    let mut model = Model::new();
    let t = IndexSet::single("t", vec![KeyValue::Int(1)]).expect("index");
    let s = IndexSet::single("s", vec![KeyValue::Int(1)]).expect("index");
    let over_t = model
        .variable(VariableSpec::continuous().over(&t))
        .expect("variable")
        .to_expr();
    let over_s = model
        .variable(VariableSpec::continuous().over(&s))
        .expect("variable")
        .to_expr();

    assert!(matches!(
        over_t.add(&over_s),
        Err(ExprError::DimensionMismatch { .. })
    ));
}

#[test]
fn degree_above_two_is_rejected() {
    let mut model = Model::new();
    let x = scalar(&mut model);

    let quadratic = x.square().expect("square");
    let result = quadratic.mul(&x);
    assert!(matches!(result, Err(ExprError::DegreeTooHigh { .. })));
    if let Err(err) = result {
        assert!(err
            .to_string()
            .contains("Only linear and quadratic expressions are supported"));
    }
}

#[test]
fn divider_must_be_positive() {
    let options = RenderOptions::new().with_quadratic_divider(0.0);
    let expr = Expression::constant(1.0);
    assert!(matches!(
        expr.to_display_string(&options),
        Err(ExprError::InvalidQuadraticDivider { .. })
    ));
}
