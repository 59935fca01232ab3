use anyhow::Context;
use numlab::prelude::*;

fn main() -> anyhow::Result<()> {
    numlab::init_logger!();

    let mut session = Session::from_env(SessionOptions::default())?;
    log::info!("running with seed {}", session.seed());

    let a = matrix(&[&[4.0, 0.0, 6.0], &[1.0, 2.0, 3.0]])?;
    let b = rand(&mut session, 2, 3);
    println!("A =\n{a}\n");
    println!("A + B =\n{}\n", &a + &b);
    println!("A .^ 2 =\n{}\n", a.pow(2.0));
    println!("sum(A, 1) = {}", sum(&a, 1)?);
    println!("mean(A, 2) = {}\n", mean(&a, 2)?.transpose());

    let s = sparse(4, 4, &[(0, 0, 2.0), (1, 2, -1.0), (3, 3, 5.0), (0, 0, 1.0)])?;
    let scaled = &s / 2.0;
    println!(
        "sparse S: {} of {} entries stored, S / 2 stores {}",
        s.stored_len(),
        s.size(),
        scaled.stored_len()
    );
    println!("full(S / 2) =\n{}\n", full(&scaled));
    println!("norm(S) = {}", norm(&s));

    let x = randn(&mut session, 1, 1000);
    println!("randn: mean {:.3}, std {:.3}", mean_all(&x)?, std(&x)?);

    let ragged = matrix(&[&[1.0, 2.0], &[3.0]]);
    if let Err(e) = ragged {
        log::debug!("ragged matrix literal rejected: {e}");
    }

    let short = linspace(0.0, 1.0, 2);
    let long = colon(1.0, 1.0, 3.0)?;
    short
        .try_add(&long)
        .context("adding vectors of different lengths")
        .map(|sum| println!("{sum}"))
        .unwrap_or_else(|e| println!("error: {e:#}"));

    Ok(())
}
