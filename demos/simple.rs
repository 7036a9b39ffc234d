use trussopt::{vector, Support, Truss};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut truss = Truss::new();
    let a = truss.add_joint(vector(0.0, 0.0));
    let b = truss.add_joint(vector(1.0, 0.0));
    let c = truss.add_joint(vector(1.0, 1.0));
    truss.set_support(a, Support::Pin)?;
    truss.set_support(b, Support::HorizontalRoller)?;
    truss.set_load(c, vector(100.0, 0.0))?;
    let ab = truss.add_member(a, b)?;
    let bc = truss.add_member(b, c)?;
    let ca = truss.add_member(c, a)?;

    if !truss.evaluate()? {
        println!("truss is unsolvable");
        return Ok(());
    }

    for (name, member) in [("ab", ab), ("bc", bc), ("ca", ca)] {
        if let Some(tension) = truss.member_tension(member) {
            println!("{name}: {tension:+.3} N");
        }
    }

    Ok(())
}
