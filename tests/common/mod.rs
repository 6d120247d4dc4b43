use assert_cmd::Command;

pub fn docweave_cmd() -> Command {
    let mut cmd = Command::cargo_bin("docweave").unwrap();
    cmd.env_remove("DOCWEAVE_ROOT");
    cmd
}
